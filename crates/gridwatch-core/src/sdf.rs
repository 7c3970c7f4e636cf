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

//! Seven-day forecast (SDF) CSV table.
//!
//! The feed is a record-typed CSV: the first field selects the row kind.
//! `H` rows carry the day labels (index 0 = today), `D` rows carry one
//! labeled series of per-day values aligned to the header ordering. Any
//! other row kind is ignored.

use csv::ReaderBuilder;

#[derive(Debug, Clone, Default)]
pub struct SdfTable {
    /// Day labels in ahead-of-today order
    pub days: Vec<String>,
    /// Labeled series in file order; a duplicated label keeps its first
    /// position but the last occurrence's values
    rows: Vec<(String, Vec<String>)>,
}

impl SdfTable {
    /// Parse the raw CSV text. Malformed lines are skipped, never fatal.
    pub fn parse(text: &str) -> Self {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut table = Self::default();
        for record in reader.records() {
            let Ok(record) = record else { continue };
            let kind = record.get(0).map(str::trim);
            match kind {
                Some("H") if record.len() > 2 => {
                    table.days = record.iter().skip(2).map(|f| f.trim().to_owned()).collect();
                }
                Some("D") if record.len() > 1 => {
                    let label = record.get(1).map(str::trim).unwrap_or_default();
                    let values: Vec<String> =
                        record.iter().skip(2).map(|f| f.trim().to_owned()).collect();
                    if !label.is_empty() && !values.is_empty() {
                        table.insert(label, values);
                    }
                }
                _ => {}
            }
        }
        table
    }

    fn insert(&mut self, label: &str, values: Vec<String>) {
        match self.rows.iter_mut().find(|(existing, _)| existing == label) {
            Some((_, existing_values)) => *existing_values = values,
            None => self.rows.push((label.to_owned(), values)),
        }
    }

    fn row(&self, label: &str) -> Option<&Vec<String>> {
        self.rows
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, values)| values)
    }

    pub fn has_row(&self, label: &str) -> bool {
        self.row(label).is_some()
    }

    /// Numeric value of `label` at `day_index`, or None when the row or
    /// cell is missing or non-numeric
    pub fn value(&self, label: &str, day_index: usize) -> Option<f64> {
        parse_mw(self.row(label)?.get(day_index)?)
    }

    /// Row labels in file order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(label, _)| label.as_str())
    }
}

/// Parse a tabular MW cell; thousands separators are stripped first
pub fn parse_mw(cell: &str) -> Option<f64> {
    let cleaned = cell.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Today's operable capacity from the forecast table: the first series
/// whose label mentions capacity or available generation, at day index 0.
pub fn extract_capacity(text: &str) -> Option<f64> {
    let table = SdfTable::parse(text);
    let label = table
        .labels()
        .find(|label| {
            let lower = label.to_lowercase();
            lower.contains("capacity") || lower.contains("available")
        })?
        .to_owned();
    table.value(&label, 0)
}
