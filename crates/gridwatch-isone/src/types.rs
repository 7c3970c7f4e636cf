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

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response of the current-system-status endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatusResponse {
    #[serde(rename = "SystemStatuses", default)]
    pub statuses: Vec<SystemStatus>,
}

/// One published status entry; `status` is free text (e.g. "Normal",
/// "M/LCC 2 Alert", "OP-4 Action 2 Implemented")
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "BeginDate", default)]
    pub begin_date: Option<DateTime<Utc>>,
}

/// Response of the five-minute system load endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SystemLoadResponse {
    #[serde(rename = "FiveMinSystemLoads", default)]
    pub loads: Vec<SystemLoadReading>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemLoadReading {
    #[serde(rename = "BeginDate", default)]
    pub begin_date: Option<DateTime<Utc>>,
    #[serde(rename = "LoadMw", default)]
    pub load_mw: Option<f64>,
}
