// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Augmenter — expands a labelled image batch with randomly transformed
// copies of every image, replicating each label alongside its image.

use augmnist_core::{AugmentConfig, AugmentError, ImageShape, Result};
use ndarray::{ArrayD, ArrayView3, Ix3};
use rand::RngCore;
use tracing::{debug, info, instrument, warn};

use crate::transform::{AffineTransformer, Transformer};

/// Augment a batch with the default [`AffineTransformer`].
///
/// See [`augment_with`] for the output layout and error conditions.
pub fn augment<L, R>(
    images: &[ArrayD<f32>],
    labels: &[L],
    config: &AugmentConfig,
    rng: &mut R,
) -> Result<(Vec<ArrayD<f32>>, Vec<L>)>
where
    L: Clone,
    R: RngCore,
{
    let transformer = AffineTransformer::from_params(&config.params);
    augment_with(images, labels, config, &transformer, rng)
}

/// Augment a batch using any [`Transformer`].
///
/// For every source image and every one of `config.repeat_factor` passes the
/// output receives, in this order: the unmodified image, then one rotated,
/// sheared, shifted and zoomed copy for each kind enabled in
/// `config.toggles`. The label of the source image is cloned for every
/// emitted sample, so both returned vectors have
/// `images.len() * repeat_factor * (1 + enabled kinds)` entries and stay
/// positionally aligned.
///
/// Every image must be rank 3 `(rows, cols, channels)` and all images must
/// share one shape. The whole input is validated first; on any error nothing
/// is returned.
#[instrument(
    skip_all,
    fields(images = images.len(), labels = labels.len(), repeat = config.repeat_factor)
)]
pub fn augment_with<L, T, R>(
    images: &[ArrayD<f32>],
    labels: &[L],
    config: &AugmentConfig,
    transformer: &T,
    rng: &mut R,
) -> Result<(Vec<ArrayD<f32>>, Vec<L>)>
where
    L: Clone,
    T: Transformer + ?Sized,
    R: RngCore,
{
    if images.len() != labels.len() {
        warn!(
            images = images.len(),
            labels = labels.len(),
            "Rejecting batch with misaligned labels"
        );
        return Err(AugmentError::ShapeMismatch {
            images: images.len(),
            labels: labels.len(),
        });
    }
    if let Err(err) = config.validate() {
        warn!(%err, "Rejecting augmentation config");
        return Err(err);
    }
    let shape = validate_shapes(images)?;

    let total = config.output_len(images.len());
    debug!(
        shape = ?shape,
        samples_per_pass = config.samples_per_pass(),
        total,
        "Augmenting batch"
    );

    let rng: &mut dyn RngCore = rng;
    let mut out_images = Vec::with_capacity(total);
    let mut out_labels = Vec::with_capacity(total);
    let toggles = config.toggles;
    let params = &config.params;

    for (image, label) in images.iter().zip(labels) {
        let view = as_rank3(image)?;

        for _ in 0..config.repeat_factor {
            out_images.push(image.clone());
            out_labels.push(label.clone());

            if toggles.rotation {
                let rotated = transformer.rotate(view, params.rotation_degrees, rng)?;
                out_images.push(rotated.into_dyn());
                out_labels.push(label.clone());
            }
            if toggles.shear {
                let sheared = transformer.shear(view, params.shear_intensity, rng)?;
                out_images.push(sheared.into_dyn());
                out_labels.push(label.clone());
            }
            if toggles.shift {
                let shifted =
                    transformer.translate(view, params.width_shift, params.height_shift, rng)?;
                out_images.push(shifted.into_dyn());
                out_labels.push(label.clone());
            }
            if toggles.zoom {
                let zoomed = transformer.zoom(view, params.zoom_range, rng)?;
                out_images.push(zoomed.into_dyn());
                out_labels.push(label.clone());
            }
        }
    }

    debug_assert_eq!(out_images.len(), total);
    info!(
        source = images.len(),
        produced = out_images.len(),
        "Augmentation complete"
    );
    Ok((out_images, out_labels))
}

/// Check that every image is rank 3 and matches the first image's shape.
fn validate_shapes(images: &[ArrayD<f32>]) -> Result<Option<ImageShape>> {
    let mut expected: Option<ImageShape> = None;
    for (index, image) in images.iter().enumerate() {
        let shape = ImageShape::from_dims(image.shape()).map_err(|err| {
            warn!(index, %err, "Rejecting malformed image");
            match err {
                AugmentError::InvalidImageShape(msg) => {
                    AugmentError::InvalidImageShape(format!("image {index}: {msg}"))
                }
                other => other,
            }
        })?;
        match expected {
            None => expected = Some(shape),
            Some(first) if first != shape => {
                warn!(index, %first, %shape, "Rejecting batch with mixed image shapes");
                return Err(AugmentError::InvalidImageShape(format!(
                    "image {index} is {shape}, expected {first} like the first image"
                )));
            }
            Some(_) => {}
        }
    }
    Ok(expected)
}

fn as_rank3(image: &ArrayD<f32>) -> Result<ArrayView3<'_, f32>> {
    image
        .view()
        .into_dimensionality::<Ix3>()
        .map_err(|err| AugmentError::InvalidImageShape(err.to_string()))
}
