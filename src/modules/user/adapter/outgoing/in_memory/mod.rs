mod state;
mod store;

pub use store::{InMemoryTransaction, InMemoryUserStore};
