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

use anyhow::Result;
use async_trait::async_trait;
use gridwatch_types::LoadRecord;

/// Abstract operator data source consumed by the cycle coordinator.
///
/// Implementations own transport concerns (URLs, timeouts, retries); the
/// coordinator only sees raw text and a pre-shaped load reading. The
/// capacity and forecast feeds share the operator's seven-day forecast
/// endpoint but are fetched independently on their own cadences.
#[async_trait]
pub trait GridDataSource: Send + Sync {
    /// Current system status as raw free text
    async fn fetch_status_text(&self) -> Result<String>;

    /// Most recent system-wide load reading
    async fn fetch_load(&self) -> Result<LoadRecord>;

    /// Raw real-time zone loads CSV for today
    async fn fetch_zone_load_csv(&self) -> Result<String>;

    /// Raw seven-day forecast CSV, used for today's operable capacity
    async fn fetch_capacity_csv(&self) -> Result<String>;

    /// Raw seven-day forecast CSV, used for multi-day alert analysis
    async fn fetch_forecast_csv(&self) -> Result<String>;
}
