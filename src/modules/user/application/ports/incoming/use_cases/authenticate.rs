use async_trait::async_trait;
use serde::Deserialize;

use crate::modules::user::application::domain::entities::User;
use crate::modules::user::application::ports::outgoing::RepositoryError;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateCommand {
    pub username: String,
    pub password: String,
}

impl AuthenticateCommand {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Username as stored at signup.
    pub fn normalized_username(&self) -> &str {
        self.username.trim()
    }
}

/// Infrastructure failures only. Bad credentials are `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticateError {
    #[error("Password verification could not run")]
    HashingFailed,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for AuthenticateError {
    fn from(err: RepositoryError) -> Self {
        AuthenticateError::RepositoryError(err.to_string())
    }
}

#[async_trait]
pub trait AuthenticateUseCase: Send + Sync {
    /// Returns the user when the username exists and the password matches.
    async fn execute(&self, command: AuthenticateCommand)
        -> Result<Option<User>, AuthenticateError>;
}
