pub mod argon2_hasher;
pub mod bcrypt_hasher;
pub mod password_hashing_service;

use std::sync::Arc;

pub use argon2_hasher::Argon2Hasher;
pub use bcrypt_hasher::BcryptHasher;
pub use password_hashing_service::PasswordHashingService;

use crate::config::{ConfigError, HashingAlgorithm, HashingConfig};
use crate::modules::user::application::ports::outgoing::PasswordHasher;

/// Build the configured password hasher. Hashes from the other supported
/// algorithm still verify.
pub fn hasher_from_config(
    config: &HashingConfig,
) -> Result<Arc<dyn PasswordHasher + Send + Sync>, ConfigError> {
    let hasher: Arc<dyn PasswordHasher + Send + Sync> = match config.algorithm {
        HashingAlgorithm::Argon2 => {
            let hasher = Argon2Hasher::with_params(
                config.argon2_memory_kib,
                config.argon2_iterations,
                config.argon2_parallelism,
            )
            .map_err(|e| ConfigError::Invalid {
                key: "ARGON2_PARAMS",
                value: e.to_string(),
            })?;
            Arc::new(hasher)
        }
        HashingAlgorithm::Bcrypt => Arc::new(BcryptHasher::with_cost(config.bcrypt_cost)),
    };

    Ok(Arc::new(PasswordHashingService::new(hasher)))
}
