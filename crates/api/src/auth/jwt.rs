//! JWT access-token generation and validation.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload. The
//! issuer and audience are checked on every validation, so a token minted for
//! another deployment sharing the secret is still rejected.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use roster_core::types::DbId;
use roster_db::config::parse_or;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ConfigError;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub username: String,
    /// The user's role name (`"admin"` or `"user"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
    pub iss: String,
    pub aud: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Access token lifetime in minutes (default: 7 days).
    pub expiry_mins: i64,
}

pub const DEFAULT_ISSUER: &str = "roster-api";
pub const DEFAULT_AUDIENCE: &str = "roster-clients";
/// Default access token expiry in minutes.
const DEFAULT_EXPIRY_MINS: i64 = 7 * 24 * 60;

impl JwtConfig {
    /// Resolve JWT configuration through a key lookup.
    ///
    /// | Env Var           | Required | Default          |
    /// |-------------------|----------|------------------|
    /// | `JWT_SECRET`      | **yes**  | --               |
    /// | `JWT_ISSUER`      | no       | `roster-api`     |
    /// | `JWT_AUDIENCE`    | no       | `roster-clients` |
    /// | `JWT_EXPIRY_MINS` | no       | `10080`          |
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let issuer = lookup("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.into());
        let audience = lookup("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.into());
        let expiry_mins = parse_or(lookup, "JWT_EXPIRY_MINS", DEFAULT_EXPIRY_MINS)?;

        Ok(Self {
            secret,
            issuer,
            audience,
            expiry_mins,
        })
    }

    /// Token lifetime in seconds, as reported to clients.
    pub fn expires_in_secs(&self) -> i64 {
        self.expiry_mins * 60
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: DbId,
    username: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        role: role.to_string(),
        exp: now + config.expires_in_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature, expiration, issuer and audience.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            expiry_mins: 15,
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let user_id = Uuid::now_v7();
        let token = generate_access_token(user_id, "ann", "admin", &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "ann");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert_eq!(claims.iss, DEFAULT_ISSUER);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::now_v7(),
            username: "ann".to_string(),
            role: "user".to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            ..test_config()
        };

        let token = generate_access_token(Uuid::now_v7(), "ann", "user", &config_a)
            .expect("token generation should succeed");

        assert!(validate_token(&token, &config_b).is_err());
    }

    #[test]
    fn test_foreign_issuer_or_audience_fails() {
        let config = test_config();
        let token = generate_access_token(Uuid::now_v7(), "ann", "user", &config).unwrap();

        let other_issuer = JwtConfig {
            issuer: "someone-else".to_string(),
            ..test_config()
        };
        assert!(validate_token(&token, &other_issuer).is_err());

        let other_audience = JwtConfig {
            audience: "mobile".to_string(),
            ..test_config()
        };
        assert!(validate_token(&token, &other_audience).is_err());
    }
}
