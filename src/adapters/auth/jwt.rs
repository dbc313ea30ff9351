//! HS256 JWT adapter for session validation.
//!
//! Validates tokens signed with a shared secret by the identity service in
//! front of the playground. Issuer, audience and expiry are always checked.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for the JWT validator.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

/// Claims carried by session tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Session validator for HS256-signed JWTs.
pub struct JwtSessionValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = decode::<SessionClaims>(token, &self.key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    tracing::warn!("Token rejected: {}", e);
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            })?
            .claims;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid user ID in token");
            AuthError::InvalidToken
        })?;

        let email = claims.email.unwrap_or_default();
        Ok(AuthenticatedUser::new(user_id, email, claims.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

    fn config() -> JwtConfig {
        JwtConfig {
            secret: SECRET.to_string(),
            issuer: "https://auth.test".to_string(),
            audience: "playground".to_string(),
        }
    }

    fn token(claims: &SessionClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(exp_offset: i64) -> SessionClaims {
        SessionClaims {
            sub: "user-42".to_string(),
            iss: "https://auth.test".to_string(),
            aud: "playground".to_string(),
            exp: chrono::Utc::now().timestamp() + exp_offset,
            email: Some("user42@example.com".to_string()),
            name: Some("User 42".to_string()),
        }
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let validator = JwtSessionValidator::new(&config());
        let user = validator.validate(&token(&claims(3600), SECRET)).await.unwrap();
        assert_eq!(user.id.as_str(), "user-42");
        assert_eq!(user.email, "user42@example.com");
        assert_eq!(user.display_name_or_email(), "User 42");
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let validator = JwtSessionValidator::new(&config());
        let result = validator.validate(&token(&claims(-3600), SECRET)).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn rejects_wrong_signature() {
        let validator = JwtSessionValidator::new(&config());
        let forged = token(&claims(3600), "another-secret-that-is-32-bytes-long!!");
        assert!(matches!(validator.validate(&forged).await, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn rejects_wrong_audience() {
        let validator = JwtSessionValidator::new(&config());
        let mut c = claims(3600);
        c.aud = "other-app".to_string();
        assert!(matches!(
            validator.validate(&token(&c, SECRET)).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn rejects_garbage() {
        let validator = JwtSessionValidator::new(&config());
        assert!(validator.validate("not-a-jwt").await.is_err());
    }
}
