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

use crate::zones::Zone;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_UPDATE_INTERVAL_MINUTES: u64 = 5;
pub const MIN_UPDATE_INTERVAL_MINUTES: u64 = 1;
pub const MAX_UPDATE_INTERVAL_MINUTES: u64 = 60;

/// Static regional fallback used when no capacity reading has ever succeeded.
/// Approximate New England operable capacity; config-overridable.
pub const DEFAULT_FALLBACK_CAPACITY_MW: f64 = 31500.0;

const DEFAULT_ZONE_LOAD_CADENCE_SECS: u64 = 600;
const DEFAULT_CSV_CADENCE_SECS: u64 = 1800;

/// Monitor configuration
///
/// The status and load feeds are fetched every cycle; the CSV-backed
/// sources run on their own slower cadences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Load zone to track in addition to the system-wide feeds
    #[serde(default)]
    pub zone: Option<Zone>,

    /// Track the system-wide status/load feeds (on by default)
    #[serde(default = "default_true")]
    pub monitor_systemwide: bool,

    /// Cycle interval in minutes, clamped to 1-60
    #[serde(default = "default_update_interval")]
    pub update_interval_minutes: u64,

    /// Capacity value used when the CSV has never been fetched successfully
    #[serde(default = "default_fallback_capacity")]
    pub fallback_capacity_mw: f64,

    #[serde(default = "default_zone_load_cadence")]
    pub zone_load_cadence_secs: u64,

    #[serde(default = "default_csv_cadence")]
    pub capacity_cadence_secs: u64,

    #[serde(default = "default_csv_cadence")]
    pub forecast_cadence_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_update_interval() -> u64 {
    DEFAULT_UPDATE_INTERVAL_MINUTES
}

fn default_fallback_capacity() -> f64 {
    DEFAULT_FALLBACK_CAPACITY_MW
}

fn default_zone_load_cadence() -> u64 {
    DEFAULT_ZONE_LOAD_CADENCE_SECS
}

fn default_csv_cadence() -> u64 {
    DEFAULT_CSV_CADENCE_SECS
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            zone: None,
            monitor_systemwide: true,
            update_interval_minutes: DEFAULT_UPDATE_INTERVAL_MINUTES,
            fallback_capacity_mw: DEFAULT_FALLBACK_CAPACITY_MW,
            zone_load_cadence_secs: DEFAULT_ZONE_LOAD_CADENCE_SECS,
            capacity_cadence_secs: DEFAULT_CSV_CADENCE_SECS,
            forecast_cadence_secs: DEFAULT_CSV_CADENCE_SECS,
        }
    }
}

impl MonitorConfig {
    /// Cycle interval with the configured minutes clamped to the 1-60 range
    pub fn update_interval(&self) -> Duration {
        let minutes = self
            .update_interval_minutes
            .clamp(MIN_UPDATE_INTERVAL_MINUTES, MAX_UPDATE_INTERVAL_MINUTES);
        Duration::from_secs(minutes * 60)
    }

    pub fn zone_load_cadence(&self) -> Duration {
        Duration::from_secs(self.zone_load_cadence_secs)
    }

    pub fn capacity_cadence(&self) -> Duration {
        Duration::from_secs(self.capacity_cadence_secs)
    }

    pub fn forecast_cadence(&self) -> Duration {
        Duration::from_secs(self.forecast_cadence_secs)
    }
}
