//! Session token validation port.
//!
//! The playground does not own user accounts. A session token issued by the
//! identity service in front of it is turned into an [`AuthenticatedUser`]
//! here, and nothing else in the crate looks at tokens.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Resolves a raw session token to the user it was issued for.
///
/// `InvalidToken` and `TokenExpired` mean the caller must sign in again;
/// `ServiceUnavailable` is transient and surfaces as a 503.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `token` is the bare value, without any `Bearer ` prefix.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
