//! Connection-string resolution and data-access settings.

use std::str::FromStr;

/// Default maximum pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
/// Default time to wait for a free connection, in seconds.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("Invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },
}

/// How the employee read path fetches its joined rows.
///
/// Both strategies return the same prefixed column set, so materialization
/// does not care which one produced a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadStrategy {
    /// Plain join SQL assembled in the repository.
    #[default]
    Inline,
    /// Set-returning SQL functions installed by migration
    /// (`proc_get_all_employees`, `proc_get_employee_by_id`).
    StoredProcedure,
}

impl ReadStrategy {
    /// Canonical configuration value, as accepted by `EMPLOYEE_READ_STRATEGY`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::StoredProcedure => "stored_procedure",
        }
    }
}

impl FromStr for ReadStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "procedure" | "stored_procedure" => Ok(Self::StoredProcedure),
            _ => Err(ConfigError::Invalid {
                key: "EMPLOYEE_READ_STRATEGY",
                value: s.to_string(),
            }),
        }
    }
}

/// Connection-pool settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DbConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default  |
    /// |---------------------------|----------|----------|
    /// | `DATABASE_URL`            | **yes**  | --       |
    /// | `DB_MAX_CONNECTIONS`      | no       | `20`     |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | no       | `5`      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let acquire_timeout_secs =
            parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_ACQUIRE_TIMEOUT_SECS)?;

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout_secs,
        })
    }
}

/// Parse `key` through `lookup`, falling back to `default` when it is unset.
pub fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let result = DbConfig::from_lookup(lookup_from(&[]));
        assert_matches!(result, Err(ConfigError::MissingDatabaseUrl));

        let result = DbConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")]));
        assert_matches!(result, Err(ConfigError::MissingDatabaseUrl));
    }

    #[test]
    fn defaults_apply() {
        let config =
            DbConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/roster")]))
                .unwrap();
        assert_eq!(config.database_url, "postgres://localhost/roster");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.acquire_timeout_secs, DEFAULT_ACQUIRE_TIMEOUT_SECS);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = DbConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/roster"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "1"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.acquire_timeout_secs, 1);
    }

    #[test]
    fn bad_numbers_name_the_key() {
        let result = DbConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/roster"),
            ("DB_MAX_CONNECTIONS", "lots"),
        ]));
        assert_matches!(
            result,
            Err(ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", .. })
        );
    }

    #[test]
    fn read_strategy_parsing() {
        assert_eq!("INLINE".parse::<ReadStrategy>(), Ok(ReadStrategy::Inline));
        assert_eq!(
            "stored_procedure".parse::<ReadStrategy>(),
            Ok(ReadStrategy::StoredProcedure)
        );
        assert_eq!("procedure".parse::<ReadStrategy>(), Ok(ReadStrategy::StoredProcedure));
        for strategy in [ReadStrategy::Inline, ReadStrategy::StoredProcedure] {
            assert_eq!(strategy.as_str().parse::<ReadStrategy>(), Ok(strategy));
        }
        assert_matches!(
            "dapper".parse::<ReadStrategy>(),
            Err(ConfigError::Invalid { key: "EMPLOYEE_READ_STRATEGY", .. })
        );
    }
}
