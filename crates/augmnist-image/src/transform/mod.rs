// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transform module — the pluggable random geometric transforms used by the
// Augmenter, and their affine-warp implementation.

pub mod affine;

pub use affine::AffineTransformer;

use augmnist_core::Result;
use ndarray::{Array3, ArrayView3};
use rand::RngCore;

/// A source of randomised, label-preserving geometric transforms.
///
/// Each method draws its own parameters from `rng` within the given range and
/// returns a new image with the same (rows, cols, channels) shape as the input.
pub trait Transformer {
    /// Rotate about the image centre by an angle drawn from
    /// `[-max_degrees, +max_degrees]`.
    fn rotate(
        &self,
        image: ArrayView3<'_, f32>,
        max_degrees: f32,
        rng: &mut dyn RngCore,
    ) -> Result<Array3<f32>>;

    /// Shear about the image centre by an angle (radians) drawn from
    /// `[-intensity, +intensity]`.
    fn shear(
        &self,
        image: ArrayView3<'_, f32>,
        intensity: f32,
        rng: &mut dyn RngCore,
    ) -> Result<Array3<f32>>;

    /// Translate by independent fractions of the width and height, each drawn
    /// from `[-max, +max]`.
    fn translate(
        &self,
        image: ArrayView3<'_, f32>,
        max_fraction_x: f32,
        max_fraction_y: f32,
        rng: &mut dyn RngCore,
    ) -> Result<Array3<f32>>;

    /// Zoom each axis by a factor drawn independently from `range`.
    fn zoom(
        &self,
        image: ArrayView3<'_, f32>,
        range: (f32, f32),
        rng: &mut dyn RngCore,
    ) -> Result<Array3<f32>>;
}
