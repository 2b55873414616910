pub mod config;
pub mod modules;
pub mod telemetry;

pub use modules::user;
pub use modules::user::application::user_directory::UserDirectory;

#[cfg(test)]
mod tests;
