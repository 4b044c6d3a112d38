//! Custom Axum extractors

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use super::server::AppState;

/// Access token from the session cookie, if the client sent one.
///
/// Never rejects: privileged reads run with a NULL token and the
/// database decides what an anonymous caller may see.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessToken(pub Option<String>);

impl AccessToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequestParts<Arc<AppState>> for AccessToken {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self(state.cookies.token_from(&jar)))
    }
}
