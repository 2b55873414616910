use async_trait::async_trait;
use serde::Deserialize;

use crate::modules::user::application::domain::entities::{
    NewUser, User, EMAIL_MAX_CHARS, USERNAME_MAX_CHARS,
};
use crate::modules::user::application::ports::outgoing::{
    HashError, RepositoryError, UniqueField,
};

//
// ──────────────────────────────────────────────────────────
// Signup Command
// ──────────────────────────────────────────────────────────
//

/// Raw signup input. Every field may be absent; validation happens in the
/// use case so a missing field surfaces as a `ValidationError`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupCommand {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub image_url: Option<String>,
}

/// Borrowed view of a command whose required fields are present.
#[derive(Debug, Clone, Copy)]
pub struct SignupFields<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub image_url: Option<&'a str>,
}

impl SignupCommand {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            email: Some(email.into()),
            password: Some(password.into()),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Check required fields. Username and email are trimmed and must fit
    /// their columns; the password is taken as given and only has to be
    /// non-empty.
    pub fn fields(&self) -> Result<SignupFields<'_>, ValidationError> {
        let username = required(&self.username, "username")?.trim();
        let email = required(&self.email, "email")?.trim();
        let password = match self.password.as_deref() {
            Some(password) if !password.is_empty() => password,
            _ => return Err(ValidationError::MissingField("password")),
        };

        max_chars(username, "username", USERNAME_MAX_CHARS)?;
        max_chars(email, "email", EMAIL_MAX_CHARS)?;

        let image_url = self
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());

        Ok(SignupFields {
            username,
            email,
            password,
            image_url,
        })
    }
}

fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn max_chars(value: &str, field: &'static str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Email already taken")]
    EmailTaken,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Password hashing failed: {0}")]
    HashingFailed(#[from] HashError),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for SignupError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UniqueViolation(UniqueField::Username) => {
                SignupError::Validation(ValidationError::UsernameTaken)
            }
            RepositoryError::UniqueViolation(UniqueField::Email) => {
                SignupError::Validation(ValidationError::EmailTaken)
            }
            other => SignupError::RepositoryError(other.to_string()),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait SignupUseCase: Send + Sync {
    /// Validate and hash without touching the store.
    async fn prepare(&self, command: SignupCommand) -> Result<NewUser, SignupError>;

    /// Validate, hash, persist and commit.
    async fn execute(&self, command: SignupCommand) -> Result<User, SignupError>;
}
