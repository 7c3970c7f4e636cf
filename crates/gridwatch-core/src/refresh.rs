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
use gridwatch_types::MonitorConfig;
use std::time::Duration;

/// CSV-backed data sources that run on their own (slower) cadence.
/// The status and load feeds are fetched every cycle and are not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsvSource {
    ZoneLoad,
    Capacity,
    Forecast,
}

#[derive(Debug, Clone)]
struct SourceState {
    last_fetch: Option<DateTime<Utc>>,
    cadence: Duration,
}

impl SourceState {
    fn new(cadence: Duration) -> Self {
        Self {
            last_fetch: None,
            cadence,
        }
    }
}

/// Per-source last-fetch bookkeeping.
///
/// Owned exclusively by the cycle coordinator; `mark_fetched` is only
/// called after a successful fetch, so a failed source stays due and is
/// retried on the next cycle while its cached value is served.
#[derive(Debug, Clone)]
pub struct RefreshCache {
    zone_load: SourceState,
    capacity: SourceState,
    forecast: SourceState,
}

impl RefreshCache {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            zone_load: SourceState::new(config.zone_load_cadence()),
            capacity: SourceState::new(config.capacity_cadence()),
            forecast: SourceState::new(config.forecast_cadence()),
        }
    }

    /// A source is due when it has never been fetched or its cadence has
    /// elapsed since the last successful fetch.
    pub fn due(&self, source: CsvSource, now: DateTime<Utc>) -> bool {
        let state = self.state(source);
        match state.last_fetch {
            None => true,
            Some(last) => {
                let elapsed = now.signed_duration_since(last).num_seconds();
                elapsed >= state.cadence.as_secs() as i64
            }
        }
    }

    pub fn mark_fetched(&mut self, source: CsvSource, now: DateTime<Utc>) {
        self.state_mut(source).last_fetch = Some(now);
    }

    fn state(&self, source: CsvSource) -> &SourceState {
        match source {
            CsvSource::ZoneLoad => &self.zone_load,
            CsvSource::Capacity => &self.capacity,
            CsvSource::Forecast => &self.forecast,
        }
    }

    fn state_mut(&mut self, source: CsvSource) -> &mut SourceState {
        match source {
            CsvSource::ZoneLoad => &mut self.zone_load,
            CsvSource::Capacity => &mut self.capacity,
            CsvSource::Forecast => &mut self.forecast,
        }
    }
}
