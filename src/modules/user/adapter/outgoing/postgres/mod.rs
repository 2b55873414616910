pub mod sea_orm_entity;
mod user_store_postgres;

pub use user_store_postgres::{ConnectError, PostgresTransaction, PostgresUserStore};
