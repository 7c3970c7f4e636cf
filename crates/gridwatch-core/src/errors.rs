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

use thiserror::Error;

/// Whole-cycle failure. Individual source failures degrade to cached or
/// fallback values inside the cycle; this error is returned only when no
/// primary feed produced data, so the host keeps displaying the previous
/// snapshot instead of crashing.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("Error communicating with operator feeds: {0}")]
    Communication(String),
}
