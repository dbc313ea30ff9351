//! The caller of a playground request.
//!
//! Populated by whichever `SessionValidator` adapter is configured; the
//! domain only ever sees the resolved user.

use super::UserId;
use thiserror::Error;

/// User resolved from a valid session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Identifier assigned by the identity service. Keys saved tool state.
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
        }
    }

    /// Name to greet the user with.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Why a session token was not accepted.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// The validator could not reach what it needs to decide.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// The caller has to sign in again; anything else is transient.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_prefers_display_name() {
        let named = AuthenticatedUser::new(
            UserId::new("u-1").unwrap(),
            "ada@example.com",
            Some("Ada".to_string()),
        );
        let anonymous = AuthenticatedUser::new(UserId::new("u-2").unwrap(), "bob@example.com", None);

        assert_eq!(named.display_name_or_email(), "Ada");
        assert_eq!(anonymous.display_name_or_email(), "bob@example.com");
    }

    #[test]
    fn only_token_problems_force_a_new_sign_in() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::service_unavailable("timeout").requires_reauthentication());
    }
}
