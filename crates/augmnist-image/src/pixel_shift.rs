// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel Shifter — per-row rightward shift of flattened square single-channel
// images, with zero-fill at both edges.

use augmnist_core::{AugmentError, Result, ShiftConfig};
use ndarray::{Array1, Array2, ArrayView1};
use tracing::{info, instrument, warn};

/// Shift every image in a batch of flattened square images.
///
/// Each image is resolved to a `side x side` grid according to
/// `config.side`, shifted with [`shift_image`], and flattened back. All image
/// lengths are checked before any image is shifted. The input batch is left
/// untouched.
#[instrument(skip_all, fields(images = images.len(), shift_by = config.shift_by))]
pub fn shift_pixels(images: &[Array1<f32>], config: &ShiftConfig) -> Result<Vec<Array1<f32>>> {
    let sides = images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            config.side.resolve(image.len()).map_err(|err| {
                warn!(index, len = image.len(), %err, "Rejecting malformed image");
                match err {
                    AugmentError::InvalidImageShape(msg) => {
                        AugmentError::InvalidImageShape(format!("image {index}: {msg}"))
                    }
                    other => other,
                }
            })
        })
        .collect::<Result<Vec<usize>>>()?;

    let shifted = images
        .iter()
        .zip(sides)
        .map(|(image, side)| shift_image(image.view(), side, config.shift_by))
        .collect::<Result<Vec<_>>>()?;

    info!(count = shifted.len(), "Pixel shift complete");
    Ok(shifted)
}

/// Shift one flattened `side x side` image `shift_by` columns to the right.
///
/// Column `c` of each output row holds input column `c - shift_by` when
/// `shift_by <= c < side - shift_by`, and zero otherwise. Both the vacated
/// leftmost columns and the rightmost `shift_by` columns end up zero, so
/// content from columns `side - 2 * shift_by ..` is lost.
pub fn shift_image(
    image: ArrayView1<'_, f32>,
    side: usize,
    shift_by: usize,
) -> Result<Array1<f32>> {
    let mut grid = Array2::from_shape_vec((side, side), image.to_vec()).map_err(|err| {
        AugmentError::InvalidImageShape(format!(
            "cannot view {} values as {side}x{side}: {err}",
            image.len()
        ))
    })?;

    let keep_below = side.saturating_sub(shift_by);
    for mut row in grid.rows_mut() {
        // Right to left, so each source column is read before it is overwritten.
        for col in (0..side).rev() {
            row[col] = if col >= shift_by && col < keep_below {
                row[col - shift_by]
            } else {
                0.0
            };
        }
    }

    Ok(grid.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use augmnist_core::SideLength;

    fn ramp(side: usize) -> Array1<f32> {
        (1..=side * side).map(|v| v as f32).collect()
    }

    #[test]
    fn shifts_rows_right_and_zeroes_both_edges() {
        let image = ramp(5);
        let out = shift_image(image.view(), 5, 1).unwrap();

        let expected: Vec<f32> = vec![
            0.0, 1.0, 2.0, 3.0, 0.0, //
            0.0, 6.0, 7.0, 8.0, 0.0, //
            0.0, 11.0, 12.0, 13.0, 0.0, //
            0.0, 16.0, 17.0, 18.0, 0.0, //
            0.0, 21.0, 22.0, 23.0, 0.0,
        ];
        assert_eq!(out.to_vec(), expected);
    }

    #[test]
    fn zero_shift_is_a_no_op() {
        let images = vec![ramp(28), ramp(28).mapv(|v| v * 0.5)];
        let config = ShiftConfig::new(0, SideLength::Fixed(28));

        let out = shift_pixels(&images, &config).unwrap();
        assert_eq!(out, images);
    }

    #[test]
    fn default_shift_zeroes_trailing_columns_of_mnist_images() {
        let images = vec![Array1::from_elem(784, 1.0f32)];

        let out = shift_pixels(&images, &ShiftConfig::default()).unwrap();
        let grid = out[0].view().into_shape_with_order((28, 28)).unwrap();
        for row in grid.rows() {
            assert_eq!(row[0], 0.0);
            assert_eq!(row[1], 0.0);
            assert_eq!(row[26], 0.0);
            assert_eq!(row[27], 0.0);
            assert!(row.iter().skip(2).take(24).all(|&v| v == 1.0));
        }
    }

    #[test]
    fn wide_shift_blanks_every_row() {
        let image = ramp(4);
        let out = shift_image(image.view(), 4, 2).unwrap();
        assert!(out.iter().all(|&v| v == 0.0));

        let out = shift_image(image.view(), 4, 9).unwrap();
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn inferred_side_accepts_any_square() {
        let images = vec![ramp(3)];
        let config = ShiftConfig::new(1, SideLength::Inferred);

        let out = shift_pixels(&images, &config).unwrap();
        assert_eq!(out[0].to_vec(), vec![0.0, 1.0, 0.0, 0.0, 4.0, 0.0, 0.0, 7.0, 0.0]);
    }

    #[test]
    fn input_batch_is_untouched() {
        let images = vec![ramp(28)];
        let before = images.clone();

        shift_pixels(&images, &ShiftConfig::default()).unwrap();
        assert_eq!(images, before);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let images = vec![ramp(28), Array1::zeros(783)];

        let err = shift_pixels(&images, &ShiftConfig::default()).unwrap_err();
        match err {
            AugmentError::InvalidImageShape(msg) => assert!(msg.contains("image 1"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_square_is_rejected_when_inferring() {
        let images = vec![Array1::zeros(10)];
        let config = ShiftConfig::new(2, SideLength::Inferred);

        let err = shift_pixels(&images, &config).unwrap_err();
        assert!(matches!(err, AugmentError::InvalidImageShape(_)));
    }

    #[test]
    fn empty_batch_is_fine() {
        let out = shift_pixels(&[], &ShiftConfig::default()).unwrap();
        assert!(out.is_empty());
    }
}
