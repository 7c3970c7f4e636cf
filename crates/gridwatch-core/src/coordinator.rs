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

//! Refresh cycle orchestration.
//!
//! One cycle fetches every due source, normalizes the responses, and
//! assembles a fresh `GridSnapshot`. Network reads are independent and run
//! concurrently; the cycle itself runs to completion before its result is
//! published, so consumers never observe a half-updated snapshot.

use crate::errors::CycleError;
use crate::refresh::{CsvSource, RefreshCache};
use crate::traits::GridDataSource;
use crate::{forecast, sdf, status, zone_load};
use chrono::{DateTime, Utc};
use gridwatch_types::{
    CapacitySnapshot, ForecastResult, GridSnapshot, LoadRecord, MonitorConfig,
    op4_action_description,
};
use tracing::{debug, info, warn};

/// Owns the refresh bookkeeping and the per-source caches between cycles.
#[derive(Debug)]
pub struct Coordinator<S> {
    source: S,
    config: MonitorConfig,
    cache: RefreshCache,
    cached_zone_load: Option<f64>,
    cached_capacity: Option<f64>,
    cached_forecast: Option<ForecastResult>,
}

impl<S: GridDataSource> Coordinator<S> {
    pub fn new(source: S, config: MonitorConfig) -> Self {
        let cache = RefreshCache::new(&config);
        Self {
            source,
            config,
            cache,
            cached_zone_load: None,
            cached_capacity: None,
            cached_forecast: None,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run one refresh cycle now.
    pub async fn run_cycle(&mut self) -> Result<GridSnapshot, CycleError> {
        self.run_cycle_at(Utc::now()).await
    }

    /// Run one refresh cycle at an explicit instant (due-ness and the
    /// snapshot timestamp are derived from it).
    pub async fn run_cycle_at(&mut self, now: DateTime<Utc>) -> Result<GridSnapshot, CycleError> {
        let zone = self.config.zone;
        let zone_load_due = zone.is_some() && self.cache.due(CsvSource::ZoneLoad, now);
        let capacity_due = self.cache.due(CsvSource::Capacity, now);
        let forecast_due = self.cache.due(CsvSource::Forecast, now);
        debug!(
            zone_load_due,
            capacity_due, forecast_due, "Starting refresh cycle"
        );

        // Independent reads, no shared mutable state: fetch concurrently
        let source = &self.source;
        let (status_res, load_res, zone_csv, capacity_csv, forecast_csv) = tokio::join!(
            source.fetch_status_text(),
            source.fetch_load(),
            async {
                if zone_load_due {
                    Some(source.fetch_zone_load_csv().await)
                } else {
                    None
                }
            },
            async {
                if capacity_due {
                    Some(source.fetch_capacity_csv().await)
                } else {
                    None
                }
            },
            async {
                if forecast_due {
                    Some(source.fetch_forecast_csv().await)
                } else {
                    None
                }
            },
        );

        // Both primary feeds down means there is nothing worth publishing;
        // the host keeps the previous snapshot.
        if let (Err(status_err), Err(load_err)) = (&status_res, &load_res) {
            return Err(CycleError::Communication(format!(
                "status: {status_err:#}; load: {load_err:#}"
            )));
        }

        let status_text = match status_res {
            Ok(text) => text,
            Err(err) => {
                warn!("Status fetch failed, assuming Normal: {err:#}");
                String::new()
            }
        };
        let mut load = match load_res {
            Ok(load) => load,
            Err(err) => {
                warn!("Load fetch failed: {err:#}");
                LoadRecord::default()
            }
        };

        if let Some(zone) = zone {
            match zone_csv {
                Some(Ok(text)) => {
                    self.cached_zone_load = zone_load::extract_zone_load(&text, zone.csv_token());
                    if self.cached_zone_load.is_none() {
                        warn!("Zone column not found for {zone}");
                    }
                    self.cache.mark_fetched(CsvSource::ZoneLoad, now);
                }
                Some(Err(err)) => {
                    warn!("Zone load fetch failed, keeping cached value: {err:#}");
                }
                None => {}
            }
            load.zone_load_mw = self.cached_zone_load;
        }

        match capacity_csv {
            Some(Ok(text)) => {
                let capacity =
                    sdf::extract_capacity(&text).unwrap_or(self.config.fallback_capacity_mw);
                self.cached_capacity = Some(capacity);
                self.cache.mark_fetched(CsvSource::Capacity, now);
            }
            Some(Err(err)) => {
                warn!("Capacity fetch failed, keeping cached value: {err:#}");
            }
            None => {}
        }
        let capacity_mw = self
            .cached_capacity
            .unwrap_or(self.config.fallback_capacity_mw);
        let capacity = CapacitySnapshot::derive(Some(capacity_mw), load.total_load_mw);

        match forecast_csv {
            Some(Ok(text)) => {
                let result = forecast::analyze_forecast_at(&text, now);
                if result.has_alerts {
                    info!(
                        "Forecast raised {} alert(s) across {} day(s)",
                        result.total_alerts,
                        result.alerts.len()
                    );
                }
                self.cached_forecast = Some(result);
                self.cache.mark_fetched(CsvSource::Forecast, now);
            }
            Some(Err(err)) => {
                warn!("Forecast fetch failed, keeping cached alerts: {err:#}");
            }
            None => {}
        }
        let forecast = self
            .cached_forecast
            .clone()
            .unwrap_or_else(|| ForecastResult::empty(now));

        let parsed_status = status::parse_status(&status_text);
        if let Some(action) = parsed_status.op4_action {
            debug!(
                "OP-4 action {}: {}",
                action,
                op4_action_description(action).unwrap_or("unknown")
            );
        }
        if parsed_status.is_emergency {
            warn!("Grid emergency: {}", parsed_status.description);
        }

        Ok(GridSnapshot {
            status_text,
            parsed_status,
            load,
            capacity,
            forecast,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::TimeDelta;
    use gridwatch_types::{Severity, Zone};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FORECAST_CSV: &str = "\
H,,Day0,Day1\n\
D,Total Capacity Supply Obligation (CSO),20000,21000\n\
D,Total Available Generation and Imports,20500,20800\n";

    const ZONE_CSV: &str = "\
Date,.Z.NEWHAMPSHIRE,.Z.MAINE\n\
12/15/2025,1103.5,980.2\n\
12/15/2025,1150.9,1020.4\n";

    #[derive(Default)]
    struct MockSource {
        status: Option<String>,
        load: Option<LoadRecord>,
        zone_csv: Option<String>,
        capacity_csv: Option<String>,
        forecast_csv: Option<String>,
        capacity_calls: AtomicUsize,
        forecast_calls: AtomicUsize,
        zone_calls: AtomicUsize,
    }

    impl MockSource {
        fn healthy() -> Self {
            Self {
                status: Some("Normal".to_owned()),
                load: Some(LoadRecord {
                    total_load_mw: Some(28000.0),
                    zone_load_mw: None,
                    timestamp: Some(Utc::now()),
                }),
                zone_csv: Some(ZONE_CSV.to_owned()),
                capacity_csv: Some(FORECAST_CSV.to_owned()),
                forecast_csv: Some(FORECAST_CSV.to_owned()),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl GridDataSource for MockSource {
        async fn fetch_status_text(&self) -> anyhow::Result<String> {
            self.status.clone().ok_or_else(|| anyhow!("status down"))
        }

        async fn fetch_load(&self) -> anyhow::Result<LoadRecord> {
            self.load.clone().ok_or_else(|| anyhow!("load down"))
        }

        async fn fetch_zone_load_csv(&self) -> anyhow::Result<String> {
            self.zone_calls.fetch_add(1, Ordering::SeqCst);
            self.zone_csv.clone().ok_or_else(|| anyhow!("csv down"))
        }

        async fn fetch_capacity_csv(&self) -> anyhow::Result<String> {
            self.capacity_calls.fetch_add(1, Ordering::SeqCst);
            self.capacity_csv.clone().ok_or_else(|| anyhow!("csv down"))
        }

        async fn fetch_forecast_csv(&self) -> anyhow::Result<String> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            self.forecast_csv.clone().ok_or_else(|| anyhow!("csv down"))
        }
    }

    fn config_with_zone() -> MonitorConfig {
        MonitorConfig {
            zone: Some(Zone::NewHampshire),
            ..MonitorConfig::default()
        }
    }

    #[tokio::test]
    async fn cycle_assembles_full_snapshot() {
        let mut coordinator = Coordinator::new(MockSource::healthy(), config_with_zone());
        let now = Utc::now();
        let snapshot = coordinator.run_cycle_at(now).await.unwrap();

        assert_eq!(snapshot.parsed_status.severity, Severity::Normal);
        assert_eq!(snapshot.load.total_load_mw, Some(28000.0));
        assert_eq!(snapshot.load.zone_load_mw, Some(1150.9));
        // Capacity comes from the first matching series in file order,
        // the CSO row, at day 0 (20,000 MW)
        assert_eq!(snapshot.capacity.capacity_mw, Some(20000.0));
        assert!(snapshot.forecast.has_alerts);
        assert_eq!(snapshot.forecast.total_alerts, 2);
        assert_eq!(snapshot.updated_at, now);
    }

    #[tokio::test]
    async fn csv_sources_respect_their_cadence() {
        let mut coordinator = Coordinator::new(MockSource::healthy(), config_with_zone());
        let start = Utc::now();
        coordinator.run_cycle_at(start).await.unwrap();
        coordinator
            .run_cycle_at(start + TimeDelta::minutes(5))
            .await
            .unwrap();

        assert_eq!(coordinator.source.capacity_calls.load(Ordering::SeqCst), 1);
        assert_eq!(coordinator.source.forecast_calls.load(Ordering::SeqCst), 1);
        assert_eq!(coordinator.source.zone_calls.load(Ordering::SeqCst), 1);

        // 31 minutes later everything is due again
        coordinator
            .run_cycle_at(start + TimeDelta::minutes(31))
            .await
            .unwrap();
        assert_eq!(coordinator.source.capacity_calls.load(Ordering::SeqCst), 2);
        assert_eq!(coordinator.source.forecast_calls.load(Ordering::SeqCst), 2);
        assert_eq!(coordinator.source.zone_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn capacity_failure_falls_back_to_static_default() {
        let mut source = MockSource::healthy();
        source.capacity_csv = None;
        let mut coordinator = Coordinator::new(source, MonitorConfig::default());
        let snapshot = coordinator.run_cycle_at(Utc::now()).await.unwrap();

        assert_eq!(snapshot.capacity.capacity_mw, Some(31500.0));
        assert_eq!(snapshot.capacity.margin_pct, Some(11.1));
    }

    #[tokio::test]
    async fn failed_source_is_retried_next_cycle_and_cache_survives() {
        let mut source = MockSource::healthy();
        source.forecast_csv = None;
        let mut coordinator = Coordinator::new(source, MonitorConfig::default());
        let start = Utc::now();

        let snapshot = coordinator.run_cycle_at(start).await.unwrap();
        assert!(!snapshot.forecast.has_alerts);
        assert_eq!(coordinator.source.forecast_calls.load(Ordering::SeqCst), 1);

        // Not marked fetched, so the very next cycle retries
        coordinator.source.forecast_csv = Some(FORECAST_CSV.to_owned());
        let snapshot = coordinator
            .run_cycle_at(start + TimeDelta::minutes(5))
            .await
            .unwrap();
        assert_eq!(coordinator.source.forecast_calls.load(Ordering::SeqCst), 2);
        assert!(snapshot.forecast.has_alerts);

        // Success marked it fetched; cached result is served within cadence
        coordinator.source.forecast_csv = None;
        let snapshot = coordinator
            .run_cycle_at(start + TimeDelta::minutes(10))
            .await
            .unwrap();
        assert_eq!(coordinator.source.forecast_calls.load(Ordering::SeqCst), 2);
        assert!(snapshot.forecast.has_alerts);
    }

    #[tokio::test]
    async fn one_primary_feed_down_still_publishes() {
        let mut source = MockSource::healthy();
        source.status = None;
        let mut coordinator = Coordinator::new(source, MonitorConfig::default());
        let snapshot = coordinator.run_cycle_at(Utc::now()).await.unwrap();

        // Degrades to the Normal baseline rather than failing the cycle
        assert_eq!(snapshot.parsed_status.severity, Severity::Normal);
        assert_eq!(snapshot.load.total_load_mw, Some(28000.0));
    }

    #[tokio::test]
    async fn both_primary_feeds_down_fails_the_cycle() {
        let mut source = MockSource::healthy();
        source.status = None;
        source.load = None;
        let mut coordinator = Coordinator::new(source, MonitorConfig::default());
        let result = coordinator.run_cycle_at(Utc::now()).await;

        assert!(matches!(result, Err(CycleError::Communication(_))));
    }

    #[tokio::test]
    async fn no_zone_configured_skips_zone_csv() {
        let mut coordinator = Coordinator::new(MockSource::healthy(), MonitorConfig::default());
        let snapshot = coordinator.run_cycle_at(Utc::now()).await.unwrap();

        assert_eq!(coordinator.source.zone_calls.load(Ordering::SeqCst), 0);
        assert_eq!(snapshot.load.zone_load_mw, None);
    }

    #[tokio::test]
    async fn emergency_status_flows_through() {
        let mut source = MockSource::healthy();
        source.status = Some("System in OP-4 Action 9 - Industrial Curtailment".to_owned());
        let mut coordinator = Coordinator::new(source, MonitorConfig::default());
        let snapshot = coordinator.run_cycle_at(Utc::now()).await.unwrap();

        assert_eq!(snapshot.parsed_status.op4_action, Some(9));
        assert_eq!(snapshot.parsed_status.severity, Severity::Warning);
        assert!(snapshot.parsed_status.is_emergency);
    }
}
