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

mod config;

use anyhow::Result;
use clap::Parser;
use gridwatch_core::Coordinator;
use gridwatch_isone::{IsoNeClient, IsoNeDataSource};
use gridwatch_types::{GridSnapshot, Zone};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "gridwatch")]
#[command(about = "ISO New England grid status and capacity monitor", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the TOML config file (defaults to ./gridwatch.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load zone to track (e.g. "new-hampshire"); overrides the config file
    #[arg(long)]
    zone: Option<Zone>,

    /// Cycle interval in minutes (1-60); overrides the config file
    #[arg(long)]
    interval: Option<u64>,

    /// Operator API base URL; overrides the config file
    #[arg(long)]
    base_url: Option<String>,

    /// Run a single refresh cycle, print the snapshot as JSON, and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with env filter support
    // Respects RUST_LOG environment variable
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(zone) = cli.zone {
        config.monitor.zone = Some(zone);
    }
    if let Some(interval) = cli.interval {
        config.monitor.update_interval_minutes = interval;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    info!("🚀 Starting GridWatch - ISO-NE Grid Monitor");
    info!("📋 Configuration Summary:");
    info!("   Base URL: {}", config.base_url);
    match config.monitor.zone {
        Some(zone) => info!("   Zone: {} ({})", zone, zone.code()),
        None => info!("   Zone: none (system-wide only)"),
    }
    info!(
        "   Cycle interval: {:?}, zone-load cadence: {:?}, CSV cadence: {:?}",
        config.monitor.update_interval(),
        config.monitor.zone_load_cadence(),
        config.monitor.capacity_cadence()
    );

    let client = Arc::new(IsoNeClient::new(&config.base_url)?);
    let source = IsoNeDataSource::new(client);
    let mut coordinator = Coordinator::new(source, config.monitor.clone());

    if cli.once {
        let snapshot = coordinator.run_cycle().await?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    // Last published snapshot; replaced wholesale after each successful
    // cycle so readers never see a partial update
    let published: Arc<RwLock<Option<GridSnapshot>>> = Arc::new(RwLock::new(None));

    let mut ticker = tokio::time::interval(coordinator.config().update_interval());
    // Cycles must not overlap; a late tick just runs the next cycle later
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match coordinator.run_cycle().await {
            Ok(snapshot) => {
                log_snapshot(&snapshot, coordinator.config().monitor_systemwide);
                *published.write() = Some(snapshot);
            }
            Err(err) => {
                let last_update = published.read().as_ref().map(|s| s.updated_at);
                match last_update {
                    Some(at) => warn!("Refresh cycle failed ({err}); showing data from {at}"),
                    None => error!("Refresh cycle failed and no snapshot available yet: {err}"),
                }
            }
        }
    }
}

fn log_snapshot(snapshot: &GridSnapshot, systemwide: bool) {
    let status = &snapshot.parsed_status;
    info!(
        "Status: {} (severity {}{})",
        status.status,
        status.severity.as_u8(),
        if status.is_emergency { ", EMERGENCY" } else { "" }
    );
    if systemwide && let Some(load) = snapshot.load.total_load_mw {
        match snapshot.capacity.margin_pct {
            Some(margin) => info!("System load: {load:.0} MW, capacity margin: {margin:.1}%"),
            None => info!("System load: {load:.0} MW"),
        }
    }
    if let Some(zone_load) = snapshot.load.zone_load_mw {
        info!("Zone load: {zone_load:.1} MW");
    }
    if snapshot.forecast.has_alerts {
        warn!(
            "⚠️ Forecast: {} alert(s) across {} day(s)",
            snapshot.forecast.total_alerts,
            snapshot.forecast.alerts.len()
        );
        for day in &snapshot.forecast.alerts {
            for alert in &day.alerts {
                warn!("   {} [{}]: {}", day.date, alert.alert_type, alert.message);
            }
        }
    }
}
