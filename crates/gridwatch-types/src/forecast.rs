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
use serde::{Deserialize, Serialize};

/// Single alert raised for one forecast day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastAlert {
    /// e.g. "Low Reserve Margin", "Critical Reserve Margin", "High Cold Weather Outages"
    #[serde(rename = "type")]
    pub alert_type: String,
    pub message: String,
    /// Short tag for icon/filter purposes ("capacity", "outage")
    pub keyword: String,
}

/// All alerts raised for a single day of the forecast window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Day label as published by the operator (e.g. "12/15/2025")
    pub date: String,
    /// 0 = today
    pub days_ahead: usize,
    pub alert_count: usize,
    pub alerts: Vec<ForecastAlert>,
}

/// Outcome of one forecast analysis pass over the seven-day window.
/// `alerts` is sorted by `days_ahead` ascending and only contains days
/// that raised at least one alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub has_alerts: bool,
    pub total_alerts: usize,
    pub alerts: Vec<ForecastDay>,
    pub checked_at: DateTime<Utc>,
}

impl ForecastResult {
    /// Empty result used when the forecast feed is unavailable or unparseable
    pub fn empty(checked_at: DateTime<Utc>) -> Self {
        Self {
            has_alerts: false,
            total_alerts: 0,
            alerts: Vec::new(),
            checked_at,
        }
    }
}
