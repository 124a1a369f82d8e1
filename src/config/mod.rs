//! Configuration module
//!
//! Provides configuration loading, validation, and default settings.

mod defaults;
mod loader;
mod validator;

pub use defaults::{default_config, ConfigDefaults};
pub use loader::{load_config, ConfigLoader};
pub use validator::{validate_config, ConfigValidator};

// Re-export the main configuration structures
pub use loader::{Config, EventConfig, LoggingConfig};

// Configuration-related error type
pub use loader::ConfigError;
