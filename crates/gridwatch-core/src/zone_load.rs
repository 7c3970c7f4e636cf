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

use crate::sdf::parse_mw;
use csv::ReaderBuilder;

/// Most recent load reading for one zone from the real-time loads CSV.
///
/// The zone's column is discovered by case-insensitive substring match of
/// `zone_token` against the column headers; the value is the last row's
/// cell. None when the column is absent or the cell is not numeric.
pub fn extract_zone_load(csv_text: &str, zone_token: &str) -> Option<f64> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let token = zone_token.to_uppercase();
    let column = reader
        .headers()
        .ok()?
        .iter()
        .position(|header| header.to_uppercase().contains(&token))?;

    let mut last_cell: Option<String> = None;
    for record in reader.records() {
        let Ok(record) = record else { continue };
        if let Some(cell) = record.get(column) {
            last_cell = Some(cell.to_owned());
        }
    }
    parse_mw(&last_cell?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,Hour Ending,.Z.MAINE,.Z.NEWHAMPSHIRE,.Z.VERMONT\n\
12/15/2025,01,980.2,1103.5,551.0\n\
12/15/2025,02,960.8,1088.1,540.2\n\
12/15/2025,03,\"1,020.4\",\"1,150.9\",560.7\n";

    #[test]
    fn finds_zone_column_case_insensitively() {
        assert_eq!(extract_zone_load(SAMPLE, "newhampshire"), Some(1150.9));
        assert_eq!(extract_zone_load(SAMPLE, "MAINE"), Some(1020.4));
    }

    #[test]
    fn takes_the_last_row() {
        assert_eq!(extract_zone_load(SAMPLE, "VERMONT"), Some(560.7));
    }

    #[test]
    fn missing_zone_column_is_none() {
        assert_eq!(extract_zone_load(SAMPLE, "CONNECTICUT"), None);
    }

    #[test]
    fn non_numeric_last_cell_is_none() {
        let csv = "Date,.Z.MAINE\n12/15/2025,980.2\n12/15/2025,n/a\n";
        assert_eq!(extract_zone_load(csv, "MAINE"), None);
    }

    #[test]
    fn empty_input_is_none() {
        assert_eq!(extract_zone_load("", "MAINE"), None);
    }
}
