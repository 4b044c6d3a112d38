//! Session rows and login/sign-up input

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::validation::{bounded_text, ValidationError};

const MAX_USERNAME_LENGTH: usize = 64;
const MAX_EMAIL_LENGTH: usize = 254;
const MAX_PASSWORD_LENGTH: usize = 256;

/// Access token and expiration returned by `sign_up` / `login`
#[derive(Debug, Clone, FromRow)]
pub struct SessionToken {
    pub access_token: String,
    pub expiration: DateTime<Utc>,
}

/// Live session details (session_info row)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SessionInfo {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub expiration: DateTime<Utc>,
}

/// Login input. The password is checked by the database only.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Result<Self, ValidationError> {
        let username = bounded_text("username", username, MAX_USERNAME_LENGTH)?;
        Ok(Self {
            username,
            password: password_field(password)?,
        })
    }
}

/// Registration input. Strength and format rules live in `sign_up`.
#[derive(Clone)]
pub struct SignUp {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignUp {
    pub fn new(username: &str, email: &str, password: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            username: bounded_text("username", username, MAX_USERNAME_LENGTH)?,
            email: bounded_text("email", email, MAX_EMAIL_LENGTH)?,
            password: password_field(password)?,
        })
    }
}

// Passwords are not trimmed.
fn password_field(password: &str) -> Result<String, ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Empty { field: "password" });
    }
    if password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::TooLong {
            field: "password",
            max: MAX_PASSWORD_LENGTH,
        });
    }
    Ok(password.to_string())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for SignUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUp")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_trim_username_not_password() {
        let creds = Credentials::new("  alice ", " secret ").unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, " secret ");
    }

    #[test]
    fn credentials_require_both_fields() {
        assert_eq!(
            Credentials::new("", "pw").unwrap_err(),
            ValidationError::Empty { field: "username" }
        );
        assert_eq!(
            Credentials::new("alice", "").unwrap_err(),
            ValidationError::Empty { field: "password" }
        );
    }

    #[test]
    fn debug_redacts_password() {
        let signup = SignUp::new("bob", "bob@example.com", "hunter22hunter").unwrap();
        let rendered = format!("{:?}", signup);
        assert!(rendered.contains("bob@example.com"));
        assert!(!rendered.contains("hunter22hunter"));
    }
}
