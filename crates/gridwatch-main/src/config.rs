// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of GridWatch.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use anyhow::{Context, Result};
use gridwatch_types::{
    MAX_UPDATE_INTERVAL_MINUTES, MIN_UPDATE_INTERVAL_MINUTES, MonitorConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

const DEFAULT_CONFIG_FILE: &str = "gridwatch.toml";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Operator API base URL; override for testing against a mock server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Monitor settings (zone, cadences, fallbacks)
    #[serde(default)]
    pub monitor: MonitorConfig,
}

fn default_base_url() -> String {
    gridwatch_isone::client::DEFAULT_BASE_URL.to_owned()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            monitor: MonitorConfig::default(),
        }
    }
}

/// Load configuration from an explicit path, the default file, or
/// built-in defaults when no file exists.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => match std::fs::read_to_string(DEFAULT_CONFIG_FILE) {
            Ok(text) => toml::from_str(&text)
                .with_context(|| format!("Failed to parse {}", DEFAULT_CONFIG_FILE))?,
            Err(_) => {
                info!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                AppConfig::default()
            }
        },
    };
    validate(&config);
    Ok(config)
}

fn validate(config: &AppConfig) {
    let minutes = config.monitor.update_interval_minutes;
    if !(MIN_UPDATE_INTERVAL_MINUTES..=MAX_UPDATE_INTERVAL_MINUTES).contains(&minutes) {
        warn!(
            "update_interval_minutes = {} is outside {}-{}, clamping",
            minutes, MIN_UPDATE_INTERVAL_MINUTES, MAX_UPDATE_INTERVAL_MINUTES
        );
    }
    if config.monitor.fallback_capacity_mw <= 0.0 {
        warn!(
            "fallback_capacity_mw = {} is not a plausible capacity",
            config.monitor.fallback_capacity_mw
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwatch_types::Zone;
    use std::io::Write;

    #[test]
    fn defaults_when_no_file() {
        let config = AppConfig::default();
        assert_eq!(config.monitor.zone, None);
        assert_eq!(config.monitor.update_interval_minutes, 5);
    }

    #[test]
    fn parses_full_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "base_url = \"http://localhost:9999\"\n\
             \n\
             [monitor]\n\
             zone = \"new-hampshire\"\n\
             update_interval_minutes = 10\n\
             fallback_capacity_mw = 30000.0\n"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.monitor.zone, Some(Zone::NewHampshire));
        assert_eq!(config.monitor.update_interval_minutes, 10);
        assert_eq!(config.monitor.fallback_capacity_mw, 30000.0);
        // Unset fields keep their defaults
        assert_eq!(config.monitor.zone_load_cadence_secs, 600);
    }

    #[test]
    fn rejects_unparseable_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "monitor = \"not a table\"").unwrap();
        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/gridwatch.toml"))).is_err());
    }
}
