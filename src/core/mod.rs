//! Core system types and foundations
//!
//! Identifiers, error handling, configuration and the application state
//! shared by the HTTP layer.

pub mod app_state;
pub mod config;
pub mod error;
pub mod factory;
pub mod types;

// Re-export commonly used items
pub use app_state::AppState;
pub use config::Config;
pub use error::{Error, Result};
pub use types::{Id, Reference};
