//! CLI configuration: TOML file plus environment, resolved against flags.
//!
//! Resolution order for every setting is flag > environment > config
//! file (clap handles the first two; figment reads the rest). Only the
//! host and password are mandatory, and only the password has no
//! flag-side default.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use secrecy::SecretString;
use serde::Deserialize;

use keeplink_core::SwitchConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Settings readable from the config file.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub poll_interval: Option<u64>,
}

/// Default config file location: `<config dir>/keeplink/config.toml`.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "keeplink")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("keeplink.toml"))
}

/// Load the config file, honoring `--config`. A missing file is an
/// empty config, not an error.
pub fn load_file_config(global: &GlobalOpts) -> Result<FileConfig, CliError> {
    let path = global.config.clone().unwrap_or_else(config_path);
    let config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("KEEPLINK_"))
        .extract()?;
    Ok(config)
}

/// Resolve flags + file into a core `SwitchConfig`.
pub fn build_switch_config(global: &GlobalOpts) -> Result<SwitchConfig, CliError> {
    let file = load_file_config(global)?;
    let path = || {
        global
            .config
            .clone()
            .unwrap_or_else(config_path)
            .display()
            .to_string()
    };

    let host = global
        .host
        .clone()
        .or(file.host)
        .ok_or_else(|| CliError::MissingHost { path: path() })?;

    let username = global
        .username
        .clone()
        .or(file.username)
        .unwrap_or_else(|| "admin".into());

    let password = global
        .password
        .clone()
        .or(file.password)
        .map(SecretString::from)
        .ok_or_else(|| CliError::MissingPassword { path: path() })?;

    let mut config = SwitchConfig::new(host, username, password);
    config.request_timeout_secs = global.timeout;
    config.cycle_timeout_secs = global.cycle_timeout;
    if let Some(interval) = file.poll_interval {
        config.poll_interval_secs = interval;
    }
    Ok(config)
}
