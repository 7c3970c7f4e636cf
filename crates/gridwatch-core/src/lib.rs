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

pub mod coordinator;
pub mod errors;
pub mod forecast;
pub mod refresh;
pub mod sdf;
pub mod status;
pub mod traits;
pub mod zone_load;

pub use coordinator::Coordinator;
pub use errors::CycleError;
pub use forecast::{analyze_forecast, analyze_forecast_at};
pub use refresh::{CsvSource, RefreshCache};
pub use sdf::{SdfTable, extract_capacity};
pub use status::parse_status;
pub use traits::GridDataSource;
pub use zone_load::extract_zone_load;
