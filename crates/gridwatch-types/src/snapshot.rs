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

use crate::forecast::ForecastResult;
use crate::load::{CapacitySnapshot, LoadRecord};
use crate::status::StatusRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Merged result of one refresh cycle.
///
/// Published to the host as a single immutable value; a new cycle replaces
/// the previous snapshot wholesale, so consumers never observe a partially
/// updated mix of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Raw status text as returned by the operator feed
    pub status_text: String,
    /// Normalized status classification
    pub parsed_status: StatusRecord,
    pub load: LoadRecord,
    pub capacity: CapacitySnapshot,
    pub forecast: ForecastResult,
    pub updated_at: DateTime<Utc>,
}

impl GridSnapshot {
    /// Convenience accessor matching the "capacity_margin" display field
    pub fn capacity_margin_pct(&self) -> Option<f64> {
        self.capacity.margin_pct
    }
}
