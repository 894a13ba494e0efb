//! Configuration loading and validation
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Protected working file matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use matcher::{
    MatcherError,
    ProtectedFiles,
};
pub use types::{
    ConfigError,
    PathsConfig,
    SyncSettings,
    TuningConfig,
    ValidationError,
};
