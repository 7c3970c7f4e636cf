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
use std::str::FromStr;

/// ISO New England load zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Zone {
    Maine,
    NewHampshire,
    Vermont,
    Connecticut,
    RhodeIsland,
    /// Southeast Massachusetts
    Semass,
    /// West/Central Massachusetts
    Wcmass,
    /// Northeast Massachusetts and Boston
    NemassBost,
}

impl Zone {
    /// Get human-readable name for the zone
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Maine => "Maine",
            Self::NewHampshire => "New Hampshire",
            Self::Vermont => "Vermont",
            Self::Connecticut => "Connecticut",
            Self::RhodeIsland => "Rhode Island",
            Self::Semass => "Southeast Massachusetts",
            Self::Wcmass => "West/Central Massachusetts",
            Self::NemassBost => "Northeast Massachusetts/Boston",
        }
    }

    /// Get config string value (kebab-case)
    pub fn to_config_value(self) -> &'static str {
        match self {
            Self::Maine => "maine",
            Self::NewHampshire => "new-hampshire",
            Self::Vermont => "vermont",
            Self::Connecticut => "connecticut",
            Self::RhodeIsland => "rhode-island",
            Self::Semass => "semass",
            Self::Wcmass => "wcmass",
            Self::NemassBost => "nemassbost",
        }
    }

    /// Zone code in the operator's location format (e.g. ".Z.NEWHAMPSHIRE")
    pub fn code(self) -> &'static str {
        match self {
            Self::Maine => ".Z.MAINE",
            Self::NewHampshire => ".Z.NEWHAMPSHIRE",
            Self::Vermont => ".Z.VERMONT",
            Self::Connecticut => ".Z.CONNECTICUT",
            Self::RhodeIsland => ".Z.RHODEISLAND",
            Self::Semass => ".Z.SEMASS",
            Self::Wcmass => ".Z.WCMASS",
            Self::NemassBost => ".Z.NEMASSBOST",
        }
    }

    /// Numeric location id used by the operator APIs
    pub fn location_id(self) -> u16 {
        match self {
            Self::Maine => 4001,
            Self::NewHampshire => 4002,
            Self::Vermont => 4003,
            Self::Connecticut => 4004,
            Self::RhodeIsland => 4005,
            Self::Semass => 4006,
            Self::Wcmass => 4007,
            Self::NemassBost => 4008,
        }
    }

    /// Token matched case-insensitively against zone-load CSV column headers
    pub fn csv_token(self) -> &'static str {
        // Same as code() without the ".Z." prefix; headers in the actual
        // loads CSV carry the bare location name.
        match self {
            Self::Maine => "MAINE",
            Self::NewHampshire => "NEWHAMPSHIRE",
            Self::Vermont => "VERMONT",
            Self::Connecticut => "CONNECTICUT",
            Self::RhodeIsland => "RHODEISLAND",
            Self::Semass => "SEMASS",
            Self::Wcmass => "WCMASS",
            Self::NemassBost => "NEMASSBOST",
        }
    }

    /// List all load zones
    pub fn all() -> &'static [Zone] {
        &[
            Self::Maine,
            Self::NewHampshire,
            Self::Vermont,
            Self::Connecticut,
            Self::RhodeIsland,
            Self::Semass,
            Self::Wcmass,
            Self::NemassBost,
        ]
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both kebab-case config values and legacy UPPER_SNAKE names
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|zone| zone.to_config_value() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown zone: '{}'. Supported zones: {}",
                    s,
                    Self::all()
                        .iter()
                        .map(|zone| zone.to_config_value())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_values() {
        assert_eq!("new-hampshire".parse::<Zone>(), Ok(Zone::NewHampshire));
        assert_eq!("NEW_HAMPSHIRE".parse::<Zone>(), Ok(Zone::NewHampshire));
        assert_eq!("maine".parse::<Zone>(), Ok(Zone::Maine));
        assert!("texas".parse::<Zone>().is_err());
    }

    #[test]
    fn code_and_token_agree() {
        for zone in Zone::all() {
            assert_eq!(zone.code(), format!(".Z.{}", zone.csv_token()));
        }
    }

    #[test]
    fn location_ids_are_unique() {
        let mut ids: Vec<u16> = Zone::all().iter().map(|z| z.location_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Zone::all().len());
    }
}
