// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// augmnist — Core types, configuration and error definitions shared across crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{AugmentConfig, Resample, ShiftConfig, TransformParams, TransformToggles};
pub use error::{AugmentError, Result};
pub use types::*;
