// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// augmnist-image — Dataset augmentation for image classifiers.
//
// Provides the Augmenter (random rotation, shear, shift and zoom with labels
// replicated per emitted sample), the Pixel Shifter for flattened square
// images, and conversions between `image` buffers and array tensors.

pub mod augment;
pub mod convert;
pub mod pixel_shift;
pub mod transform;

// Re-export the entry points so callers can use `augmnist_image::augment` etc.
pub use augment::{augment, augment_with};
pub use convert::{decode_gray, flatten_gray, gray_to_tensor, tensor_to_gray};
pub use pixel_shift::{shift_image, shift_pixels};
pub use transform::{AffineTransformer, Transformer};

pub use augmnist_core::{
    AugmentConfig, AugmentError, Resample, Result, ShiftConfig, SideLength, TransformParams,
    TransformToggles,
};
