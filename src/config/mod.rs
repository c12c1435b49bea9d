//! Configuration module

pub mod settings;
pub mod validation;

pub use settings::{
    AuthConfig, DatabaseConfig, FeedConfig, LoggingConfig, Settings, StorageConfig,
};
