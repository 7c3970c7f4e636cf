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

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical status labels used by the normalized record
pub const STATUS_NORMAL: &str = "Normal";
pub const STATUS_MLCC2: &str = "M/LCC 2 Alert";
pub const STATUS_OP4: &str = "OP-4";
pub const STATUS_OP7: &str = "OP-7 Emergency";
pub const STATUS_EEA: &str = "Energy Emergency Alert";
pub const STATUS_EEA1: &str = "EEA Level 1";
pub const STATUS_EEA2: &str = "EEA Level 2";
pub const STATUS_EEA3: &str = "EEA Level 3";

/// Alert severity scale (0-5)
///
/// The scale is fixed: OP-4 actions 1-3 map to `Elevated`, 4-5 to `Watch`,
/// 6-9 to `Warning`, and 10-11 (plus OP-7 and EEA 3) to `Emergency`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    #[default]
    Normal,
    /// M/LCC 2 abnormal-conditions advisory
    Advisory,
    /// Early OP-4 actions, EEA 1, Power Caution
    Elevated,
    Watch,
    Warning,
    Emergency,
}

impl Severity {
    /// Numeric level as exposed to consumers (0-5)
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Advisory => 1,
            Self::Elevated => 2,
            Self::Watch => 3,
            Self::Warning => 4,
            Self::Emergency => 5,
        }
    }

    /// Get human-readable name for the severity level
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Advisory => "Advisory",
            Self::Elevated => "Elevated",
            Self::Watch => "Power Watch",
            Self::Warning => "Power Warning",
            Self::Emergency => "Emergency",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Normalized system status record, rebuilt wholesale every refresh cycle.
///
/// `op4_action` and `eea_level` are mutually exclusive; each is populated
/// only by its own classification branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Status label (canonical label when classified, raw text otherwise)
    pub status: String,
    pub severity: Severity,
    /// OP-4 action number (1-11) when present in the status text
    pub op4_action: Option<u8>,
    /// EEA level (1-3) when present in the status text
    pub eea_level: Option<u8>,
    pub description: String,
    pub is_emergency: bool,
}

impl StatusRecord {
    /// Baseline record for text that matches no known alert pattern
    pub fn baseline(status_text: &str) -> Self {
        let status = if status_text.trim().is_empty() {
            STATUS_NORMAL.to_owned()
        } else {
            status_text.to_owned()
        };
        Self {
            status,
            severity: Severity::Normal,
            op4_action: None,
            eea_level: None,
            description: "Grid operating normally".to_owned(),
            is_emergency: false,
        }
    }
}

/// Human descriptions of the graduated OP-4 actions (1-11)
pub fn op4_action_description(action: u8) -> Option<&'static str> {
    match action {
        1 => Some("Power Caution - Resources Notified"),
        2 => Some("EEA Level 1 Declared"),
        3 => Some("Voluntary Load Curtailment Requested"),
        4 => Some("Power Watch - Conservation May Be Needed"),
        5 => Some("30-Minute Reserve Depletion"),
        6 => Some("Demand Response - 2hr Block A"),
        7 => Some("Demand Response - 2hr Block B"),
        8 => Some("5% Voltage Reduction / EEA Level 2"),
        9 => Some("Customer Generation & Industrial Curtailment"),
        10 => Some("Power Warning - Immediate Reduction Needed"),
        11 => Some("Governor Appeals / Load Shed Preparation"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_scale_is_ordered() {
        assert!(Severity::Normal < Severity::Advisory);
        assert!(Severity::Watch < Severity::Warning);
        assert!(Severity::Warning < Severity::Emergency);
        assert_eq!(Severity::Emergency.as_u8(), 5);
        assert_eq!(Severity::Normal.as_u8(), 0);
    }

    #[test]
    fn baseline_keeps_raw_text() {
        let record = StatusRecord::baseline("Routine maintenance notice");
        assert_eq!(record.status, "Routine maintenance notice");
        assert_eq!(record.severity, Severity::Normal);
        assert!(!record.is_emergency);
        assert_eq!(record.op4_action, None);
        assert_eq!(record.eea_level, None);
    }

    #[test]
    fn baseline_defaults_empty_text_to_normal() {
        let record = StatusRecord::baseline("  ");
        assert_eq!(record.status, STATUS_NORMAL);
    }

    #[test]
    fn op4_table_covers_all_eleven_actions() {
        for action in 1..=11 {
            assert!(op4_action_description(action).is_some(), "action {action}");
        }
        assert_eq!(op4_action_description(0), None);
        assert_eq!(op4_action_description(12), None);
    }
}
