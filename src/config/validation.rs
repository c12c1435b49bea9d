//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;

use super::Settings;
use crate::utils::errors::{FestHubError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_storage_config(&settings.storage)?;
    validate_feed_config(&settings.feed)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(FestHubError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(FestHubError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(FestHubError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate auth service configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    Url::parse(&config.base_url)
        .map_err(|e| FestHubError::Config(format!("Invalid auth base URL: {e}")))?;

    if config.anon_key.is_empty() {
        return Err(FestHubError::Config(
            "Auth anon key is required".to_string(),
        ));
    }

    if config.jwt_secret.is_empty() {
        return Err(FestHubError::Config(
            "Auth JWT secret is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate storage service configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    Url::parse(&config.base_url)
        .map_err(|e| FestHubError::Config(format!("Invalid storage base URL: {e}")))?;

    if config.bucket.is_empty() {
        return Err(FestHubError::Config(
            "Storage bucket is required".to_string(),
        ));
    }

    if config.service_key.is_empty() {
        return Err(FestHubError::Config(
            "Storage service key is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate feed configuration
fn validate_feed_config(config: &super::FeedConfig) -> Result<()> {
    if config.fetch_limit <= 0 {
        return Err(FestHubError::Config(
            "Feed fetch limit must be greater than 0".to_string(),
        ));
    }

    if config.reconcile_interval_secs == 0 {
        return Err(FestHubError::Config(
            "Reconcile interval must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(FestHubError::Config(
            "Logging level is required".to_string(),
        ));
    }

    Ok(())
}
