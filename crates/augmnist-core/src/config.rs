// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Augmentation and pixel-shift configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AugmentError, Result};
use crate::types::SideLength;

/// Which transformation kinds the Augmenter emits, one sample each per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformToggles {
    pub rotation: bool,
    pub shear: bool,
    pub shift: bool,
    pub zoom: bool,
}

impl Default for TransformToggles {
    fn default() -> Self {
        Self::all()
    }
}

impl TransformToggles {
    /// Every transformation kind enabled.
    pub fn all() -> Self {
        Self {
            rotation: true,
            shear: true,
            shift: true,
            zoom: true,
        }
    }

    /// No transformation kinds enabled; only baseline samples are emitted.
    pub fn none() -> Self {
        Self {
            rotation: false,
            shear: false,
            shift: false,
            zoom: false,
        }
    }

    /// Number of enabled kinds.
    pub fn enabled_count(&self) -> usize {
        [self.rotation, self.shear, self.shift, self.zoom]
            .into_iter()
            .filter(|&on| on)
            .count()
    }
}

/// Interpolation used when sampling a transformed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resample {
    Nearest,
    #[default]
    Bilinear,
}

/// Ranges the random transformation parameters are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    /// Maximum absolute rotation in degrees.
    pub rotation_degrees: f32,
    /// Maximum absolute shear angle in radians.
    pub shear_intensity: f32,
    /// Maximum horizontal shift as a fraction of the image width.
    pub width_shift: f32,
    /// Maximum vertical shift as a fraction of the image height.
    pub height_shift: f32,
    /// Inclusive range each axis' zoom factor is drawn from. A factor is the
    /// fraction of the source visible in the output, so values below 1 enlarge.
    pub zoom_range: (f32, f32),
    /// Value written to pixels that map outside the source image.
    pub fill_value: f32,
    pub resample: Resample,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            rotation_degrees: 20.0,
            shear_intensity: 0.2,
            width_shift: 0.2,
            height_shift: 0.2,
            zoom_range: (0.8, 0.9),
            fill_value: 0.0,
            resample: Resample::Bilinear,
        }
    }
}

impl TransformParams {
    pub fn validate(&self) -> Result<()> {
        // Rotations past a half turn repeat angles already covered; shifts
        // past a whole image only produce fill.
        bounded("rotation_degrees", self.rotation_degrees, 180.0)?;
        bounded("shear_intensity", self.shear_intensity, f32::MAX)?;
        bounded("width_shift", self.width_shift, 1.0)?;
        bounded("height_shift", self.height_shift, 1.0)?;

        let (lo, hi) = self.zoom_range;
        if !lo.is_finite() || !hi.is_finite() || lo <= 0.0 || lo > hi {
            return Err(AugmentError::InvalidParameter(format!(
                "zoom_range must satisfy 0 < lo <= hi, got ({lo}, {hi})"
            )));
        }
        // cos(shear) must stay away from zero for the shear to be invertible.
        if self.shear_intensity >= std::f32::consts::FRAC_PI_2 {
            return Err(AugmentError::InvalidParameter(format!(
                "shear_intensity must be below pi/2 radians, got {}",
                self.shear_intensity
            )));
        }
        if !self.fill_value.is_finite() {
            return Err(AugmentError::InvalidParameter(format!(
                "fill_value must be finite, got {}",
                self.fill_value
            )));
        }
        Ok(())
    }
}

fn bounded(name: &str, value: f32, max: f32) -> Result<()> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(AugmentError::InvalidParameter(format!(
            "{name} must be within [0, {max}], got {value}"
        )))
    }
}

/// Settings for one call to the Augmenter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    /// Independent passes per source image; must be at least 1.
    pub repeat_factor: usize,
    pub toggles: TransformToggles,
    pub params: TransformParams,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            repeat_factor: 1,
            toggles: TransformToggles::all(),
            params: TransformParams::default(),
        }
    }
}

impl AugmentConfig {
    /// A configuration that only emits baseline samples.
    pub fn baseline_only() -> Self {
        Self {
            toggles: TransformToggles::none(),
            ..Self::default()
        }
    }

    pub fn with_repeat_factor(mut self, repeat_factor: usize) -> Self {
        self.repeat_factor = repeat_factor;
        self
    }

    pub fn with_toggles(mut self, toggles: TransformToggles) -> Self {
        self.toggles = toggles;
        self
    }

    pub fn with_params(mut self, params: TransformParams) -> Self {
        self.params = params;
        self
    }

    /// Samples emitted per source image per pass: the baseline plus one per
    /// enabled toggle.
    pub fn samples_per_pass(&self) -> usize {
        1 + self.toggles.enabled_count()
    }

    /// Exact output length for a batch of `batch_len` source images.
    pub fn output_len(&self, batch_len: usize) -> usize {
        batch_len * self.repeat_factor * self.samples_per_pass()
    }

    pub fn validate(&self) -> Result<()> {
        if self.repeat_factor < 1 {
            return Err(AugmentError::InvalidParameter(format!(
                "repeat_factor must be at least 1, got {}",
                self.repeat_factor
            )));
        }
        self.params.validate()
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Settings for the Pixel Shifter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftConfig {
    /// Columns each row is shifted to the right.
    pub shift_by: usize,
    pub side: SideLength,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            shift_by: 2,
            side: SideLength::default(),
        }
    }
}

impl ShiftConfig {
    pub fn new(shift_by: usize, side: SideLength) -> Self {
        Self { shift_by, side }
    }
}
