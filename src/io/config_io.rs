use std::fs;
use std::path::{Path, PathBuf};

use crate::model::ModelError;
use crate::model::config::AppConfig;
use crate::model::user::User;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ModelError),
}

/// Read a config file. A missing `path` yields the defaults.
pub fn read_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let Some(path) = path else {
        tracing::debug!("no config file given, using defaults");
        return Ok(AppConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = parse_config(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Apply the `[user]` overrides to a profile.
///
/// Goals are validated together; a goal given without its partner keeps the
/// profile's current value for the other one.
pub fn apply_user_overrides(config: &AppConfig, user: &mut User) -> Result<(), ConfigError> {
    let overrides = &config.user;
    if overrides.daily_goal.is_some() || overrides.weekly_goal.is_some() {
        let daily = overrides.daily_goal.unwrap_or(user.daily_goal);
        let weekly = overrides.weekly_goal.unwrap_or(user.weekly_goal);
        user.set_goals(daily, weekly)?;
    }
    if let Some(name) = &overrides.name {
        user.name = name.clone();
    }
    if let Some(email) = &overrides.email {
        user.email = email.clone();
    }
    if let Some(avatar) = &overrides.avatar {
        user.avatar = Some(avatar.clone());
    }
    Ok(())
}
