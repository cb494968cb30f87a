// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for augmnist.

use thiserror::Error;

/// Top-level error type for all augmentation operations.
///
/// Every batch operation validates its whole input before producing output,
/// so an error always means that nothing was returned for the batch.
#[derive(Debug, Error)]
pub enum AugmentError {
    // -- Input validation --
    #[error("batch length mismatch: {images} images but {labels} labels")]
    ShapeMismatch { images: usize, labels: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid image shape: {0}")]
    InvalidImageShape(String),

    // -- Conversion --
    #[error("image conversion failed: {0}")]
    ImageError(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AugmentError>;
