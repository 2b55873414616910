pub mod follow_repository;
pub mod message_repository;
pub mod password_hasher;
pub mod store;
pub mod user_repository;

pub use follow_repository::FollowRepository;
pub use message_repository::MessageRepository;
pub use password_hasher::{HashError, PasswordHasher};
pub use store::{RepositoryError, StoreTransaction, UniqueField, UserStore};
pub use user_repository::UserRepository;
