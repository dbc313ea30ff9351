//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum JWT secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Session token configuration (HS256 JWT)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret the identity service signs session tokens with
    pub jwt_secret: String,

    /// Expected `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Where browsers without a session are redirected
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Cookie carrying the session token for browser requests
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
}

impl AuthConfig {
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production
            && self.jwt_secret.len() < MIN_PRODUCTION_SECRET_BYTES
        {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_BYTES));
        }
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }
        if !self.login_path.starts_with('/') {
            return Err(ValidationError::InvalidLoginPath);
        }
        if self.session_cookie.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SESSION_COOKIE"));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: default_issuer(),
            audience: default_audience(),
            login_path: default_login_path(),
            session_cookie: default_session_cookie(),
        }
    }
}

fn default_issuer() -> String {
    "playground".to_string()
}

fn default_audience() -> String {
    "playground".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_session_cookie() -> String {
    "playground_session".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.session_cookie, "playground_session");
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(
            AuthConfig::default().validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn short_secret_is_rejected_only_in_production() {
        let config = with_secret("dev-secret");
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::JwtSecretTooShort(32))
        );

        let strong = with_secret(&"x".repeat(32));
        assert!(strong.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn login_path_must_be_absolute() {
        let config = AuthConfig {
            login_path: "login".to_string(),
            ..with_secret("dev-secret")
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidLoginPath)
        );
    }
}
