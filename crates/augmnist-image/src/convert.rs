// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversions between `image` grayscale buffers and the array layouts used by
// the Augmenter (rows x cols x 1) and the Pixel Shifter (flattened rows).

use augmnist_core::{AugmentError, Result};
use image::{GrayImage, Luma};
use ndarray::{Array1, Array3, ArrayView3};
use tracing::{debug, instrument};

/// Decode encoded image bytes (PNG, JPEG, ...) into a grayscale tensor.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_gray(data: &[u8]) -> Result<Array3<f32>> {
    let img = image::load_from_memory(data).map_err(|err| {
        AugmentError::ImageError(format!("failed to decode image: {}", err))
    })?;
    debug!(
        width = img.width(),
        height = img.height(),
        "Image decoded from bytes"
    );
    Ok(gray_to_tensor(&img.to_luma8()))
}

/// Copy a grayscale image into a `(rows, cols, 1)` tensor of raw 0..=255 values.
pub fn gray_to_tensor(image: &GrayImage) -> Array3<f32> {
    let (width, height) = image.dimensions();
    Array3::from_shape_fn((height as usize, width as usize, 1), |(row, col, _)| {
        image.get_pixel(col as u32, row as u32).0[0] as f32
    })
}

/// Flatten a grayscale image row by row, the layout the Pixel Shifter expects.
pub fn flatten_gray(image: &GrayImage) -> Array1<f32> {
    image.pixels().map(|pixel| pixel.0[0] as f32).collect()
}

/// Turn a single-channel tensor back into a grayscale image. Values are
/// rounded and clamped to 0..=255.
pub fn tensor_to_gray(tensor: ArrayView3<'_, f32>) -> Result<GrayImage> {
    let (rows, cols, channels) = tensor.dim();
    if channels != 1 {
        return Err(AugmentError::InvalidImageShape(format!(
            "expected a single channel, got {channels}"
        )));
    }
    let (width, height) = match (u32::try_from(cols), u32::try_from(rows)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(AugmentError::ImageError(format!(
                "{rows}x{cols} exceeds image buffer limits"
            )));
        }
    };

    Ok(GrayImage::from_fn(width, height, |x, y| {
        let value = tensor[[y as usize, x as usize, 0]];
        Luma([value.round().clamp(0.0, 255.0) as u8])
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};

    fn gradient() -> GrayImage {
        GrayImage::from_fn(4, 3, |x, y| Luma([(y * 4 + x) as u8 * 10]))
    }

    #[test]
    fn gray_tensor_is_rows_by_cols() {
        let tensor = gray_to_tensor(&gradient());
        assert_eq!(tensor.dim(), (3, 4, 1));
        assert_eq!(tensor[[0, 3, 0]], 30.0);
        assert_eq!(tensor[[2, 0, 0]], 80.0);
    }

    #[test]
    fn tensor_back_to_gray() {
        let image = gradient();
        let back = tensor_to_gray(gray_to_tensor(&image).view()).unwrap();
        assert_eq!(back, image);
    }

    #[test]
    fn tensor_values_are_clamped() {
        let tensor = Array3::from_shape_vec((1, 3, 1), vec![-5.0, 127.6, 300.0]).unwrap();
        let gray = tensor_to_gray(tensor.view()).unwrap();
        assert_eq!(gray.as_raw(), &vec![0u8, 128, 255]);
    }

    #[test]
    fn multi_channel_tensor_is_rejected() {
        let tensor = Array3::<f32>::zeros((2, 2, 3));
        let err = tensor_to_gray(tensor.view()).unwrap_err();
        assert!(matches!(err, AugmentError::InvalidImageShape(_)));
    }

    #[test]
    fn flatten_is_row_major() {
        let flat = flatten_gray(&gradient());
        assert_eq!(flat.len(), 12);
        assert_eq!(flat[5], 50.0);
    }

    #[test]
    fn decode_png_bytes() {
        let mut buffer = Vec::new();
        DynamicImage::ImageLuma8(gradient())
            .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();

        let tensor = decode_gray(&buffer).unwrap();
        assert_eq!(tensor, gray_to_tensor(&gradient()));
    }

    #[test]
    fn decode_garbage_fails() {
        let err = decode_gray(b"not an image").unwrap_err();
        assert!(matches!(err, AugmentError::ImageError(_)));
    }
}
