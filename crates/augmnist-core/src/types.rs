// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for image batches.

use serde::{Deserialize, Serialize};

use crate::error::{AugmentError, Result};

/// Side length of the MNIST digit images.
pub const MNIST_SIDE: usize = 28;

/// Shape of one image in an augmentation batch, in (rows, cols, channels) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageShape {
    pub rows: usize,
    pub cols: usize,
    pub channels: usize,
}

impl ImageShape {
    pub fn new(rows: usize, cols: usize, channels: usize) -> Self {
        Self {
            rows,
            cols,
            channels,
        }
    }

    /// Build a shape from an array's dimensions, rejecting anything that is
    /// not rank 3 or that has an empty axis.
    pub fn from_dims(dims: &[usize]) -> Result<Self> {
        match *dims {
            [rows, cols, channels] if rows > 0 && cols > 0 && channels > 0 => {
                Ok(Self::new(rows, cols, channels))
            }
            [_, _, _] => Err(AugmentError::InvalidImageShape(format!(
                "image has an empty axis: {:?}",
                dims
            ))),
            _ => Err(AugmentError::InvalidImageShape(format!(
                "expected rank 3 (rows, cols, channels), got rank {} {:?}",
                dims.len(),
                dims
            ))),
        }
    }

    /// Number of scalar values in one image.
    pub fn len(&self) -> usize {
        self.rows * self.cols * self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for ImageShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.rows, self.cols, self.channels)
    }
}

/// How the Pixel Shifter determines the side of a flattened square image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideLength {
    /// Every image must have exactly `n * n` values.
    Fixed(usize),
    /// The side is the integer square root of the image length, which must
    /// be a perfect square.
    Inferred,
}

impl Default for SideLength {
    fn default() -> Self {
        Self::Fixed(MNIST_SIDE)
    }
}

impl SideLength {
    /// Resolve the side length for a flattened image of `len` values.
    pub fn resolve(self, len: usize) -> Result<usize> {
        match self {
            Self::Fixed(side) => {
                if side == 0 {
                    return Err(AugmentError::InvalidParameter(
                        "side length must be positive".into(),
                    ));
                }
                if side.checked_mul(side) == Some(len) {
                    Ok(side)
                } else {
                    Err(AugmentError::InvalidImageShape(format!(
                        "expected a {side}x{side} image, got {len} values"
                    )))
                }
            }
            Self::Inferred => {
                let side = integer_sqrt(len);
                if side > 0 && side * side == len {
                    Ok(side)
                } else {
                    Err(AugmentError::InvalidImageShape(format!(
                        "image length {} is not a perfect square",
                        len
                    )))
                }
            }
        }
    }
}

/// Largest `s` with `s * s <= n`.
fn integer_sqrt(n: usize) -> usize {
    let mut s = (n as f64).sqrt() as usize;
    // Float rounding can land one off in either direction for large n.
    while s.checked_mul(s).is_none_or(|sq| sq > n) {
        s -= 1;
    }
    while (s + 1).checked_mul(s + 1).is_some_and(|sq| sq <= n) {
        s += 1;
    }
    s
}
