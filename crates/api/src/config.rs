use roster_db::config::parse_or;
use roster_db::ReadStrategy;

use crate::auth::jwt::JwtConfig;

/// Errors raised while resolving server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error(transparent)]
    Invalid(#[from] roster_db::ConfigError),
}

/// Server configuration loaded from environment variables.
///
/// Everything except the JWT secret has a default suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How employee reads are issued (default: inline join SQL).
    pub read_strategy: ReadStrategy,
    /// Insert default departments and designations into empty tables at startup.
    pub seed_lookup_data: bool,
    /// Account to create or promote to `admin` at startup, if configured.
    pub bootstrap_admin: Option<AdminBootstrap>,
    /// JWT token configuration (secret, issuer, audience, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `EMPLOYEE_READ_STRATEGY` | `inline`                   |
    /// | `SEED_LOOKUP_DATA`       | `true`                     |
    ///
    /// See [`AdminBootstrap::from_lookup`] for the `ADMIN_*` variables and
    /// [`JwtConfig::from_lookup`] for the `JWT_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 3000u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let read_strategy = parse_or(&lookup, "EMPLOYEE_READ_STRATEGY", ReadStrategy::default())?;
        let seed_lookup_data = parse_or(&lookup, "SEED_LOOKUP_DATA", true)?;
        let bootstrap_admin = AdminBootstrap::from_lookup(&lookup)?;

        let jwt = JwtConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            read_strategy,
            seed_lookup_data,
            bootstrap_admin,
            jwt,
        })
    }
}

/// Credentials for the administrator account ensured at startup.
///
/// Self-registration only ever grants the default role, so this is how a
/// fresh deployment gets its first admin.
#[derive(Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminBootstrap {
    /// | Env Var          | Required                      |
    /// |------------------|-------------------------------|
    /// | `ADMIN_USERNAME` | no; bootstrap is off if unset |
    /// | `ADMIN_EMAIL`    | when `ADMIN_USERNAME` is set  |
    /// | `ADMIN_PASSWORD` | when `ADMIN_USERNAME` is set  |
    pub fn from_lookup<F>(lookup: &F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(username) = lookup("ADMIN_USERNAME").filter(|u| !u.trim().is_empty()) else {
            return Ok(None);
        };
        let email = lookup("ADMIN_EMAIL").ok_or(ConfigError::Missing("ADMIN_EMAIL"))?;
        let password = lookup("ADMIN_PASSWORD").ok_or(ConfigError::Missing("ADMIN_PASSWORD"))?;
        Ok(Some(Self {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password,
        }))
    }
}
