// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_MUSICBRAINZ_BASE_URL: &str = "https://musicbrainz.org/ws/2";
pub const DEFAULT_THROTTLE_WINDOW_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONTACT: &str = "https://github.com/arlo-music/arlo";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MusicBrainzConfig {
    pub base_url: String,
    pub throttle_window_ms: u64,
    pub timeout_secs: u64,
    /// Contact URL or e-mail sent in the User-Agent.
    pub contact: String,
}

impl Default for MusicBrainzConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MUSICBRAINZ_BASE_URL.to_string(),
            throttle_window_ms: DEFAULT_THROTTLE_WINDOW_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            contact: DEFAULT_CONTACT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    pub musicbrainz: MusicBrainzConfig,
    pub telemetry: TelemetryConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: ARLO_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("ARLO_").split("__"));

    let config: AppConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}
