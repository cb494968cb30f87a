// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Affine transformer — rotation, shear, translation and zoom implemented as
// projective warps with `imageproc`. Each channel plane is warped separately
// as a `Luma<f32>` buffer, so any channel count and value range is supported.

use augmnist_core::{AugmentError, Resample, Result, TransformParams};
use image::{ImageBuffer, Luma};
use imageproc::geometric_transformations::{Interpolation, Projection, warp};
use ndarray::{Array3, ArrayView3, s};
use rand::RngCore;
use rand::distr::{Distribution, Uniform};
use tracing::{debug, instrument};

use super::Transformer;

type Plane = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Default [`Transformer`] backed by `imageproc` projective warps.
///
/// Pixels that map outside the source image are set to `fill_value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransformer {
    fill_value: f32,
    resample: Resample,
}

impl Default for AffineTransformer {
    fn default() -> Self {
        Self::from_params(&TransformParams::default())
    }
}

impl AffineTransformer {
    pub fn new(fill_value: f32, resample: Resample) -> Self {
        Self {
            fill_value,
            resample,
        }
    }

    /// Take the fill value and interpolation from augmentation parameters.
    pub fn from_params(params: &TransformParams) -> Self {
        Self::new(params.fill_value, params.resample)
    }

    pub fn fill_value(&self) -> f32 {
        self.fill_value
    }

    pub fn resample(&self) -> Resample {
        self.resample
    }

    // -- Deterministic transforms ---------------------------------------------

    /// Rotate about the image centre by `degrees` (clockwise in image space).
    pub fn rotate_by(&self, image: ArrayView3<'_, f32>, degrees: f32) -> Result<Array3<f32>> {
        let projection = about_center(image, Projection::rotate(degrees.to_radians()));
        self.warp_planes(image, &projection)
    }

    /// Shear about the image centre by `radians`.
    pub fn shear_by(&self, image: ArrayView3<'_, f32>, radians: f32) -> Result<Array3<f32>> {
        let shear = Projection::from_matrix([
            1.0,
            -radians.sin(),
            0.0,
            0.0,
            radians.cos(),
            0.0,
            0.0,
            0.0,
            1.0,
        ])
        .ok_or_else(|| {
            AugmentError::InvalidParameter(format!("shear of {radians} rad is not invertible"))
        })?;
        let projection = about_center(image, shear);
        self.warp_planes(image, &projection)
    }

    /// Translate by `dx` columns and `dy` rows. Positive values move content
    /// right and down.
    pub fn translate_by(
        &self,
        image: ArrayView3<'_, f32>,
        dx: f32,
        dy: f32,
    ) -> Result<Array3<f32>> {
        self.warp_planes(image, &Projection::translate(dx, dy))
    }

    /// Zoom about the image centre. `zx` and `zy` are the fractions of the
    /// source width and height visible in the output.
    pub fn zoom_by(&self, image: ArrayView3<'_, f32>, zx: f32, zy: f32) -> Result<Array3<f32>> {
        if !(zx.is_finite() && zy.is_finite() && zx > 0.0 && zy > 0.0) {
            return Err(AugmentError::InvalidParameter(format!(
                "zoom factors must be positive, got ({zx}, {zy})"
            )));
        }
        let projection = about_center(image, Projection::scale(1.0 / zx, 1.0 / zy));
        self.warp_planes(image, &projection)
    }

    // -- Warping ----------------------------------------------------------------

    fn interpolation(&self) -> Interpolation {
        match self.resample {
            Resample::Nearest => Interpolation::Nearest,
            Resample::Bilinear => Interpolation::Bilinear,
        }
    }

    /// Apply `projection` (source to destination coordinates) to every
    /// channel plane of `image`.
    ///
    /// Each plane is padded by one replicated column and row on the right and
    /// bottom. The bilinear sampler needs a right and lower neighbour, so
    /// without the padding samples on the last column and row would read as
    /// outside the image. The padding is cropped off again after warping.
    fn warp_planes(
        &self,
        image: ArrayView3<'_, f32>,
        projection: &Projection,
    ) -> Result<Array3<f32>> {
        let (rows, cols, channels) = image.dim();
        let (width, height) = match (u32::try_from(cols), u32::try_from(rows)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 && w < u32::MAX && h < u32::MAX => (w, h),
            _ => {
                return Err(AugmentError::InvalidImageShape(format!(
                    "cannot warp a {rows}x{cols} image"
                )));
            }
        };

        let mut output = Array3::<f32>::zeros((rows, cols, channels));
        let default = Luma([self.fill_value]);

        for channel in 0..channels {
            let plane: Plane = ImageBuffer::from_fn(width + 1, height + 1, |x, y| {
                let row = (y as usize).min(rows - 1);
                let col = (x as usize).min(cols - 1);
                Luma([image[[row, col, channel]]])
            });
            let warped = warp(&plane, projection, self.interpolation(), default);
            let mut out_plane = output.slice_mut(s![.., .., channel]);
            for ((row, col), value) in out_plane.indexed_iter_mut() {
                *value = warped.get_pixel(col as u32, row as u32).0[0];
            }
        }

        Ok(output)
    }
}

impl Transformer for AffineTransformer {
    #[instrument(skip(self, image, rng), fields(shape = ?image.dim()))]
    fn rotate(
        &self,
        image: ArrayView3<'_, f32>,
        max_degrees: f32,
        rng: &mut dyn RngCore,
    ) -> Result<Array3<f32>> {
        let degrees = draw_symmetric(rng, "max_degrees", max_degrees)?;
        debug!(degrees, "Random rotation");
        self.rotate_by(image, degrees)
    }

    #[instrument(skip(self, image, rng), fields(shape = ?image.dim()))]
    fn shear(
        &self,
        image: ArrayView3<'_, f32>,
        intensity: f32,
        rng: &mut dyn RngCore,
    ) -> Result<Array3<f32>> {
        let radians = draw_symmetric(rng, "intensity", intensity)?;
        debug!(radians, "Random shear");
        self.shear_by(image, radians)
    }

    #[instrument(skip(self, image, rng), fields(shape = ?image.dim()))]
    fn translate(
        &self,
        image: ArrayView3<'_, f32>,
        max_fraction_x: f32,
        max_fraction_y: f32,
        rng: &mut dyn RngCore,
    ) -> Result<Array3<f32>> {
        let (rows, cols, _) = image.dim();
        let dx = draw_symmetric(rng, "max_fraction_x", max_fraction_x)? * cols as f32;
        let dy = draw_symmetric(rng, "max_fraction_y", max_fraction_y)? * rows as f32;
        debug!(dx, dy, "Random shift");
        self.translate_by(image, dx, dy)
    }

    #[instrument(skip(self, image, rng), fields(shape = ?image.dim()))]
    fn zoom(
        &self,
        image: ArrayView3<'_, f32>,
        range: (f32, f32),
        rng: &mut dyn RngCore,
    ) -> Result<Array3<f32>> {
        let (lo, hi) = range;
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo <= hi) {
            return Err(AugmentError::InvalidParameter(format!(
                "zoom range must satisfy 0 < lo <= hi, got ({lo}, {hi})"
            )));
        }
        let zx = draw_between(rng, "zoom_range", lo, hi)?;
        let zy = draw_between(rng, "zoom_range", lo, hi)?;
        debug!(zx, zy, "Random zoom");
        self.zoom_by(image, zx, zy)
    }
}

/// Conjugate `inner` with translations so it acts about the image centre.
/// Pixels are sampled at integer coordinates, so the centre of a `cols`-wide
/// grid is at `(cols - 1) / 2`.
fn about_center(image: ArrayView3<'_, f32>, inner: Projection) -> Projection {
    let (rows, cols, _) = image.dim();
    let cx = cols.saturating_sub(1) as f32 / 2.0;
    let cy = rows.saturating_sub(1) as f32 / 2.0;
    Projection::translate(cx, cy) * inner * Projection::translate(-cx, -cy)
}

/// Draw uniformly from `[-max, +max]`.
fn draw_symmetric(rng: &mut dyn RngCore, name: &str, max: f32) -> Result<f32> {
    if !(max.is_finite() && max >= 0.0) {
        return Err(AugmentError::InvalidParameter(format!(
            "{name} must be finite and non-negative, got {max}"
        )));
    }
    draw_between(rng, name, -max, max)
}

/// Draw uniformly from `[lo, hi]`. Ranges whose width overflows `f32` are
/// rejected rather than sampled.
fn draw_between(rng: &mut dyn RngCore, name: &str, lo: f32, hi: f32) -> Result<f32> {
    let uniform = Uniform::new_inclusive(lo, hi).map_err(|err| {
        AugmentError::InvalidParameter(format!(
            "{name} range [{lo}, {hi}] cannot be sampled: {err}"
        ))
    })?;
    Ok(uniform.sample(rng))
}
