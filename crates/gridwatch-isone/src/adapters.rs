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

use crate::client::IsoNeClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use chrono_tz::America::New_York;
use gridwatch_core::GridDataSource;
use gridwatch_types::LoadRecord;
use std::sync::Arc;

/// ISO-NE adapter implementing GridDataSource.
///
/// Date-stamped CSV files are keyed by the operator's local (Eastern)
/// calendar date, not UTC.
#[derive(Debug, Clone)]
pub struct IsoNeDataSource {
    client: Arc<IsoNeClient>,
}

impl IsoNeDataSource {
    pub fn new(client: Arc<IsoNeClient>) -> Self {
        Self { client }
    }

    /// Get reference to the underlying client
    pub fn client(&self) -> &Arc<IsoNeClient> {
        &self.client
    }

    fn operator_date() -> NaiveDate {
        Utc::now().with_timezone(&New_York).date_naive()
    }
}

#[async_trait]
impl GridDataSource for IsoNeDataSource {
    async fn fetch_status_text(&self) -> Result<String> {
        self.client
            .current_status()
            .await
            .context("Failed to fetch system status")
    }

    async fn fetch_load(&self) -> Result<LoadRecord> {
        self.client
            .current_load()
            .await
            .context("Failed to fetch system load")
    }

    async fn fetch_zone_load_csv(&self) -> Result<String> {
        self.client
            .zone_loads_csv(Self::operator_date())
            .await
            .context("Failed to fetch zone loads CSV")
    }

    async fn fetch_capacity_csv(&self) -> Result<String> {
        self.client
            .seven_day_forecast_csv(Self::operator_date())
            .await
            .context("Failed to fetch capacity CSV")
    }

    async fn fetch_forecast_csv(&self) -> Result<String> {
        self.client
            .seven_day_forecast_csv(Self::operator_date())
            .await
            .context("Failed to fetch forecast CSV")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn adapter_stamps_todays_date_into_csv_urls() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                Matcher::Regex(
                    r"^/static-transform/csv/histRpts/rt-load/WW_RT_ACTUAL_LOADS_\d{8}\.csv$"
                        .to_owned(),
                ),
            )
            .with_status(200)
            .with_body("Date,.Z.MAINE\n12/15/2025,980.2\n")
            .create_async()
            .await;

        let client = Arc::new(IsoNeClient::new(server.url()).unwrap());
        let source = IsoNeDataSource::new(client);
        let csv = source.fetch_zone_load_csv().await.unwrap();

        assert!(csv.contains(".Z.MAINE"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn adapter_surfaces_status_text() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1.1/currentsystemstatus")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"SystemStatuses": [{"Status": "OP-4 Action 2 Implemented"}]}).to_string(),
            )
            .create_async()
            .await;

        let client = Arc::new(IsoNeClient::new(server.url()).unwrap());
        let source = IsoNeDataSource::new(client);
        let text = source.fetch_status_text().await.unwrap();

        assert_eq!(text, "OP-4 Action 2 Implemented");
    }

    #[tokio::test]
    async fn adapter_error_carries_context() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Regex(r"^/transform/csv/sdf".to_owned()))
            .with_status(500)
            .create_async()
            .await;

        let client = Arc::new(
            IsoNeClient::new(server.url())
                .unwrap()
                .with_retry_config(1, std::time::Duration::from_millis(1)),
        );
        let source = IsoNeDataSource::new(client);
        let err = source.fetch_forecast_csv().await.unwrap_err();

        assert!(format!("{err:#}").contains("Failed to fetch forecast CSV"));
    }
}
