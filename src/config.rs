use std::env;
use std::str::FromStr;

use crate::modules::user::application::domain::entities::{
    DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} is not set")]
    Missing { key: &'static str },

    #[error("Invalid {key} value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashingAlgorithm {
    Argon2,
    Bcrypt,
}

impl FromStr for HashingAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" | "argon2id" => Ok(HashingAlgorithm::Argon2),
            "bcrypt" => Ok(HashingAlgorithm::Bcrypt),
            other => Err(format!("Unknown hashing algorithm: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashingConfig {
    pub algorithm: HashingAlgorithm,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub argon2_parallelism: u32,
    pub bcrypt_cost: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            algorithm: HashingAlgorithm::Argon2,
            argon2_memory_kib: 4 * 1024,
            argon2_iterations: 3,
            argon2_parallelism: 1,
            bcrypt_cost: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub environment: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub default_image_url: String,
    pub default_header_image_url: String,
    pub hashing: HashingConfig,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            database_url: None,
            max_connections: 10,
            run_migrations: true,
            default_image_url: DEFAULT_IMAGE_URL.to_string(),
            default_header_image_url: DEFAULT_HEADER_IMAGE_URL.to_string(),
            hashing: HashingConfig::default(),
        }
    }
}

impl DirectoryConfig {
    /// Load configuration from the process environment.
    ///
    /// `.env.{RUST_ENV}` is tried first, then `.env`. Variables already set
    /// in the environment win over both files.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let env_file = format!(".env.{}", environment);
        if dotenvy::from_filename(&env_file).is_err() {
            dotenvy::dotenv().ok();
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let hashing_defaults = HashingConfig::default();

        let hashing = HashingConfig {
            algorithm: parse_or(
                &lookup,
                "PASSWORD_HASH_ALGORITHM",
                hashing_defaults.algorithm,
            )?,
            argon2_memory_kib: parse_or(
                &lookup,
                "ARGON2_MEMORY_KIB",
                hashing_defaults.argon2_memory_kib,
            )?,
            argon2_iterations: parse_or(
                &lookup,
                "ARGON2_ITERATIONS",
                hashing_defaults.argon2_iterations,
            )?,
            argon2_parallelism: parse_or(
                &lookup,
                "ARGON2_PARALLELISM",
                hashing_defaults.argon2_parallelism,
            )?,
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", hashing_defaults.bcrypt_cost)?,
        };

        if !(4..=31).contains(&hashing.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: hashing.bcrypt_cost.to_string(),
            });
        }

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            environment: non_empty(&lookup, "RUST_ENV").unwrap_or(defaults.environment),
            database_url: non_empty(&lookup, "DATABASE_URL"),
            max_connections,
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", defaults.run_migrations)?,
            default_image_url: non_empty(&lookup, "DEFAULT_IMAGE_URL")
                .unwrap_or(defaults.default_image_url),
            default_header_image_url: non_empty(&lookup, "DEFAULT_HEADER_IMAGE_URL")
                .unwrap_or(defaults.default_header_image_url),
            hashing,
        })
    }

    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing { key: "DATABASE_URL" })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(lookup, key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = DirectoryConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, DirectoryConfig::default());
        assert_eq!(config.default_image_url, "/static/images/default-pic.png");
        assert_eq!(config.environment, "development");
        assert_eq!(
            config.require_database_url(),
            Err(ConfigError::Missing { key: "DATABASE_URL" })
        );
    }

    #[test]
    fn test_reads_all_values() {
        let config = DirectoryConfig::from_lookup(lookup_from(&[
            ("RUST_ENV", "production"),
            ("DATABASE_URL", "postgresql:///warbler-test"),
            ("DB_MAX_CONNECTIONS", "25"),
            ("RUN_MIGRATIONS", "false"),
            ("DEFAULT_IMAGE_URL", "/img/me.png"),
            ("PASSWORD_HASH_ALGORITHM", "BCRYPT"),
            ("BCRYPT_COST", "10"),
            ("ARGON2_MEMORY_KIB", "8192"),
        ]))
        .unwrap();

        assert_eq!(config.environment, "production");
        assert_eq!(config.require_database_url(), Ok("postgresql:///warbler-test"));
        assert_eq!(config.max_connections, 25);
        assert!(!config.run_migrations);
        assert_eq!(config.default_image_url, "/img/me.png");
        assert_eq!(config.default_header_image_url, DEFAULT_HEADER_IMAGE_URL);
        assert_eq!(config.hashing.algorithm, HashingAlgorithm::Bcrypt);
        assert_eq!(config.hashing.bcrypt_cost, 10);
        assert_eq!(config.hashing.argon2_memory_kib, 8192);
        assert_eq!(config.hashing.argon2_iterations, 3);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config =
            DirectoryConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  "), ("BCRYPT_COST", "")]))
                .unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.hashing.bcrypt_cost, 12);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result = DirectoryConfig::from_lookup(lookup_from(&[("ARGON2_ITERATIONS", "many")]));

        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                key: "ARGON2_ITERATIONS",
                value: "many".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let result =
            DirectoryConfig::from_lookup(lookup_from(&[("PASSWORD_HASH_ALGORITHM", "md5")]));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "PASSWORD_HASH_ALGORITHM",
                ..
            })
        ));
    }

    #[test]
    fn test_bcrypt_cost_out_of_range_is_rejected() {
        let result = DirectoryConfig::from_lookup(lookup_from(&[("BCRYPT_COST", "40")]));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_pool_size_is_rejected() {
        let result = DirectoryConfig::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "0")]));

        assert!(result.is_err());
    }
}
