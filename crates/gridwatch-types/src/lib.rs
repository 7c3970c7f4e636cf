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

pub mod config;
pub mod forecast;
pub mod load;
pub mod snapshot;
pub mod status;
pub mod zones;

// Re-export common types for convenience
pub use config::{
    DEFAULT_FALLBACK_CAPACITY_MW, DEFAULT_UPDATE_INTERVAL_MINUTES, MAX_UPDATE_INTERVAL_MINUTES,
    MIN_UPDATE_INTERVAL_MINUTES, MonitorConfig,
};
pub use forecast::{ForecastAlert, ForecastDay, ForecastResult};
pub use load::{CapacitySnapshot, LoadRecord};
pub use snapshot::GridSnapshot;
pub use status::{Severity, StatusRecord, op4_action_description};
pub use zones::Zone;
