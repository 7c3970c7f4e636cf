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

use crate::errors::{IsoNeError, IsoNeResult};
use crate::types::{SystemLoadReading, SystemLoadResponse, SystemStatusResponse};
use chrono::NaiveDate;
use gridwatch_types::LoadRecord;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.iso-ne.com";

/// Per-request timeout; a slow endpoint degrades to cached data rather
/// than stalling the whole cycle
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// ISO New England public data client
#[derive(Debug, Clone)]
pub struct IsoNeClient {
    base_url: String,
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl IsoNeClient {
    /// Create a new client against a custom base URL
    pub fn new(base_url: impl Into<String>) -> IsoNeResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IsoNeError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client,
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        })
    }

    /// Client against the public ISO-NE endpoints
    pub fn public() -> IsoNeResult<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Set custom retry configuration
    pub fn with_retry_config(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Current system status free text (e.g. "Normal", "OP-4 Action 2")
    pub async fn current_status(&self) -> IsoNeResult<String> {
        let url = format!("{}/api/v1.1/currentsystemstatus", self.base_url);
        debug!("Fetching system status: {}", url);

        let response = self
            .retry_request(|| async { self.client.get(&url).send().await })
            .await?;

        match response.status() {
            StatusCode::OK => {
                let parsed = response.json::<SystemStatusResponse>().await?;
                let entry = parsed.statuses.into_iter().next().ok_or_else(|| {
                    IsoNeError::MalformedResponse("no status entries returned".to_owned())
                })?;
                debug!("System status: '{}'", entry.status);
                Ok(entry.status)
            }
            status => {
                let message = response.text().await.unwrap_or_default();
                error!("Status endpoint failed with {}: {}", status, message);
                Err(IsoNeError::ApiError {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Most recent five-minute system load reading
    pub async fn current_load(&self) -> IsoNeResult<LoadRecord> {
        let url = format!("{}/api/v1.1/fiveminutesystemload/current", self.base_url);
        debug!("Fetching system load: {}", url);

        let response = self
            .retry_request(|| async { self.client.get(&url).send().await })
            .await?;

        match response.status() {
            StatusCode::OK => {
                let parsed = response.json::<SystemLoadResponse>().await?;
                let latest: SystemLoadReading = parsed.loads.into_iter().last().ok_or_else(|| {
                    IsoNeError::MalformedResponse("no load readings returned".to_owned())
                })?;
                debug!("System load: {:?} MW", latest.load_mw);
                Ok(LoadRecord {
                    total_load_mw: latest.load_mw,
                    zone_load_mw: None,
                    timestamp: latest.begin_date,
                })
            }
            status => {
                let message = response.text().await.unwrap_or_default();
                error!("Load endpoint failed with {}: {}", status, message);
                Err(IsoNeError::ApiError {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Real-time zone loads CSV for the given (local operator) date
    pub async fn zone_loads_csv(&self, date: NaiveDate) -> IsoNeResult<String> {
        let url = format!(
            "{}/static-transform/csv/histRpts/rt-load/WW_RT_ACTUAL_LOADS_{}.csv",
            self.base_url,
            date.format("%Y%m%d")
        );
        self.fetch_csv(&url).await
    }

    /// Seven-day capacity forecast CSV starting at the given date
    pub async fn seven_day_forecast_csv(&self, start: NaiveDate) -> IsoNeResult<String> {
        let url = format!(
            "{}/transform/csv/sdf?start={}",
            self.base_url,
            start.format("%Y%m%d")
        );
        self.fetch_csv(&url).await
    }

    /// Fetch a raw CSV document; non-200 responses are reported as
    /// `CsvUnavailable` so callers can degrade to cached data
    async fn fetch_csv(&self, url: &str) -> IsoNeResult<String> {
        debug!("Fetching CSV: {}", url);
        let response = self
            .retry_request(|| async { self.client.get(url).send().await })
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("CSV fetch failed: HTTP {} for {}", status, url);
            return Err(IsoNeError::CsvUnavailable {
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut>(&self, mut request_fn: F) -> IsoNeResult<reqwest::Response>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay;

        loop {
            attempts += 1;
            match request_fn().await {
                Ok(response) => return Ok(response),
                Err(e) if attempts >= self.max_retries => {
                    error!("Request failed after {} attempts: {}", attempts, e);
                    return Err(IsoNeError::HttpError(e));
                }
                Err(e) => {
                    warn!(
                        "Request failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempts, self.max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}
