// Export our modules for use in binaries and tests
pub mod config;
pub mod loader;

pub use config::Settings;
pub use loader::{load_store, spawn_load, try_finish, LoadError};
