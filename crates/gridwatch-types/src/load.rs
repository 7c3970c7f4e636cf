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

/// Most recent load reading, system-wide plus the configured zone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadRecord {
    pub total_load_mw: Option<f64>,
    pub zone_load_mw: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Operable capacity and the headroom over the current load
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacitySnapshot {
    pub capacity_mw: Option<f64>,
    /// (capacity - load) / capacity * 100, rounded to one decimal
    pub margin_pct: Option<f64>,
}

impl CapacitySnapshot {
    /// Compute the margin from the freshest capacity and load readings.
    /// Not computable (margin `None`) when either operand is missing or
    /// capacity is zero.
    pub fn derive(capacity_mw: Option<f64>, total_load_mw: Option<f64>) -> Self {
        let margin_pct = match (capacity_mw, total_load_mw) {
            (Some(capacity), Some(load)) if capacity != 0.0 => {
                Some(round1((capacity - load) / capacity * 100.0))
            }
            _ => None,
        };
        Self {
            capacity_mw,
            margin_pct,
        }
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_matches_formula() {
        let snapshot = CapacitySnapshot::derive(Some(31500.0), Some(28000.0));
        assert_eq!(snapshot.capacity_mw, Some(31500.0));
        assert_eq!(snapshot.margin_pct, Some(11.1));
    }

    #[test]
    fn margin_none_when_load_missing() {
        let snapshot = CapacitySnapshot::derive(Some(31500.0), None);
        assert_eq!(snapshot.margin_pct, None);
    }

    #[test]
    fn margin_none_when_capacity_missing_or_zero() {
        assert_eq!(
            CapacitySnapshot::derive(None, Some(20000.0)).margin_pct,
            None
        );
        assert_eq!(
            CapacitySnapshot::derive(Some(0.0), Some(20000.0)).margin_pct,
            None
        );
    }

    #[test]
    fn negative_margin_is_representable() {
        let snapshot = CapacitySnapshot::derive(Some(20000.0), Some(21000.0));
        assert_eq!(snapshot.margin_pct, Some(-5.0));
    }
}
