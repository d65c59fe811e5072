pub mod cli;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod init;

// Re-export main types for easy access
pub use config::{ConfigError, ConfigSource, Spec};
pub use diagnostics::{Diagnostics, Verbosity};
