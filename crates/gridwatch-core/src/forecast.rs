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

//! Multi-day capacity forecast analysis.
//!
//! Two independent passes over the seven-day table: reserve margin
//! (available generation vs. capacity supply obligation) and anticipated
//! cold-weather outages. Alerts for the same day merge into a single
//! `ForecastDay` entry.

use crate::sdf::SdfTable;
use chrono::{DateTime, Utc};
use gridwatch_types::{ForecastAlert, ForecastDay, ForecastResult};

pub const ROW_CSO: &str = "Total Capacity Supply Obligation (CSO)";
pub const ROW_AVAILABLE: &str = "Total Available Generation and Imports";
pub const ROW_COLD_WEATHER_OUTAGES: &str = "Anticipated Cold Weather Outages";

/// Margins below this raise a reserve alert; below zero it is critical
const LOW_MARGIN_THRESHOLD_PCT: f64 = 5.0;
const COLD_WEATHER_OUTAGE_THRESHOLD_MW: f64 = 3000.0;

/// Analyze the raw forecast CSV for capacity trouble in the days ahead.
pub fn analyze_forecast(text: &str) -> ForecastResult {
    analyze_forecast_at(text, Utc::now())
}

/// Deterministic variant taking the check timestamp explicitly.
pub fn analyze_forecast_at(text: &str, now: DateTime<Utc>) -> ForecastResult {
    let table = SdfTable::parse(text);
    let mut days: Vec<ForecastDay> = Vec::new();

    // Reserve margin pass
    if table.has_row(ROW_CSO) && table.has_row(ROW_AVAILABLE) {
        for (index, date) in table.days.iter().enumerate() {
            let (Some(cso), Some(available)) = (
                table.value(ROW_CSO, index),
                table.value(ROW_AVAILABLE, index),
            ) else {
                continue;
            };
            if cso == 0.0 {
                // Margin not computable for this day
                continue;
            }
            let margin = (available - cso) / cso * 100.0;
            if margin < LOW_MARGIN_THRESHOLD_PCT {
                let alert_type = if margin < 0.0 {
                    "Critical Reserve Margin"
                } else {
                    "Low Reserve Margin"
                };
                push_alert(
                    &mut days,
                    date,
                    index,
                    ForecastAlert {
                        alert_type: alert_type.to_owned(),
                        message: format!(
                            "Reserve margin: {margin:.1}% (Available: {} MW, Required: {} MW)",
                            format_mw(available),
                            format_mw(cso)
                        ),
                        keyword: "capacity".to_owned(),
                    },
                );
            }
        }
    }

    // Cold-weather outage pass
    if table.has_row(ROW_COLD_WEATHER_OUTAGES) {
        for (index, date) in table.days.iter().enumerate() {
            let Some(outage) = table.value(ROW_COLD_WEATHER_OUTAGES, index) else {
                continue;
            };
            if outage > COLD_WEATHER_OUTAGE_THRESHOLD_MW {
                push_alert(
                    &mut days,
                    date,
                    index,
                    ForecastAlert {
                        alert_type: "High Cold Weather Outages".to_owned(),
                        message: format!("{} MW offline due to cold weather", format_mw(outage)),
                        keyword: "outage".to_owned(),
                    },
                );
            }
        }
    }

    // Explicit final sort so the result is deterministic regardless of
    // which pass touched a day first
    days.sort_by_key(|day| day.days_ahead);

    let total_alerts = days.iter().map(|day| day.alert_count).sum();
    ForecastResult {
        has_alerts: !days.is_empty(),
        total_alerts,
        alerts: days,
        checked_at: now,
    }
}

/// Append an alert to the day's entry, creating the entry on first alert.
/// Linear search is fine at the seven-day window size.
fn push_alert(days: &mut Vec<ForecastDay>, date: &str, days_ahead: usize, alert: ForecastAlert) {
    if let Some(existing) = days.iter_mut().find(|day| day.days_ahead == days_ahead) {
        existing.alerts.push(alert);
        existing.alert_count += 1;
    } else {
        days.push(ForecastDay {
            date: date.to_owned(),
            days_ahead,
            alert_count: 1,
            alerts: vec![alert],
        });
    }
}

/// Whole-MW rendering with thousands separators (31500 -> "31,500")
fn format_mw(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
