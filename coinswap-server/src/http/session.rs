//! Session cookie issue and removal

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use coinswap_core::{SameSitePolicy, SessionSection};
use time::OffsetDateTime;

use crate::models::SessionToken;

/// Builds the access-token cookie from the `[session]` config section
#[derive(Debug, Clone)]
pub struct SessionCookies {
    name: String,
    same_site: SameSite,
    secure: bool,
    http_only: bool,
}

impl SessionCookies {
    pub fn from_config(section: &SessionSection) -> Self {
        let same_site = match section.same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::Lax => SameSite::Lax,
            SameSitePolicy::None => SameSite::None,
        };
        Self {
            name: section.cookie_name.clone(),
            same_site,
            secure: section.secure,
            http_only: section.http_only,
        }
    }

    fn base(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value))
            .path("/")
            .same_site(self.same_site)
            .secure(self.secure)
            .http_only(self.http_only)
            .build()
    }

    /// Cookie carrying a fresh token; expires with the session.
    pub fn issue(&self, token: &SessionToken) -> Cookie<'static> {
        let mut cookie = self.base(token.access_token.clone());
        // chrono -> time; out-of-range timestamps fall back to a session cookie
        if let Ok(expires) = OffsetDateTime::from_unix_timestamp(token.expiration.timestamp()) {
            cookie.set_expires(expires);
        }
        cookie
    }

    /// Empty cookie that expires immediately.
    pub fn clear(&self) -> Cookie<'static> {
        let mut cookie = self.base(String::new());
        cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
        cookie
    }

    /// Token from the request cookies. An empty value counts as absent.
    pub fn token_from(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.name)
            .map(|c| c.value().trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}
