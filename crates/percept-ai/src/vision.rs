//! Deterministic ImageNet preprocessing.
//!
//! Resize so the shorter side is 256 (triangle filter, fixed), center-crop
//! to 224×224, scale pixel values to [0,1], then standardize per channel
//! with the ImageNet mean/std. Repeated calls on the same image are
//! bit-identical; nothing here is randomized.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use thiserror::Error;

use percept_core::imagenet::{CHANNELS, CROP_SIZE, MEAN, RESIZE_SHORTER, STD, TENSOR_LEN};

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: std::path::PathBuf,
        source: image::ImageError,
    },

    #[error("image of {width}x{height} cannot be coerced to a {CROP_SIZE}x{CROP_SIZE} RGB input")]
    InvalidImage { width: u32, height: u32 },
}

/// One normalized model input: a flat NCHW `1×3×224×224` f32 buffer.
#[derive(Debug)]
pub struct ImageTensor {
    data: Vec<f32>,
}

impl ImageTensor {
    /// ONNX-style shape tuple for the singleton batch.
    pub fn shape(&self) -> [i64; 4] {
        [1, CHANNELS as i64, CROP_SIZE as i64, CROP_SIZE as i64]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// Decode an image from disk.
pub fn open_image(path: &Path) -> Result<DynamicImage, VisionError> {
    image::open(path).map_err(|source| VisionError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply the full normalization pipeline to a decoded image.
///
/// Grayscale and alpha inputs are coerced to RGB first (luma replicates
/// into all three channels), so any decodable raster is accepted except
/// zero-sized ones.
pub fn preprocess(img: &DynamicImage) -> Result<ImageTensor, VisionError> {
    let rgb: RgbImage = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(VisionError::InvalidImage { width, height });
    }

    // Shorter side → RESIZE_SHORTER, aspect ratio preserved.
    let (new_w, new_h) = if width <= height {
        let h = (height as f64 * RESIZE_SHORTER as f64 / width as f64).round() as u32;
        (RESIZE_SHORTER, h)
    } else {
        let w = (width as f64 * RESIZE_SHORTER as f64 / height as f64).round() as u32;
        (w, RESIZE_SHORTER)
    };
    let resized = imageops::resize(&rgb, new_w, new_h, FilterType::Triangle);

    // Center crop. Both sides are >= RESIZE_SHORTER, so the crop always fits.
    let x0 = (new_w - CROP_SIZE) / 2;
    let y0 = (new_h - CROP_SIZE) / 2;

    let mut data = Vec::with_capacity(TENSOR_LEN);
    for c in 0..CHANNELS {
        for y in 0..CROP_SIZE {
            for x in 0..CROP_SIZE {
                let px = resized.get_pixel(x0 + x, y0 + y)[c];
                data.push((px as f32 / 255.0 - MEAN[c]) / STD[c]);
            }
        }
    }

    Ok(ImageTensor { data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb};

    /// Deterministic synthetic RGB image with a per-pixel gradient.
    fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn output_shape_is_fixed_for_any_input_size() {
        for (w, h) in [(640, 480), (256, 256), (224, 224), (60, 100), (1000, 300)] {
            let tensor = preprocess(&gradient_rgb(w, h)).unwrap();
            assert_eq!(tensor.as_slice().len(), TENSOR_LEN, "input {w}x{h}");
            assert_eq!(tensor.shape(), [1, 3, 224, 224]);
        }
    }

    #[test]
    fn preprocessing_is_deterministic() {
        let img = gradient_rgb(500, 375);
        let a = preprocess(&img).unwrap();
        let b = preprocess(&img).unwrap();
        assert_eq!(a.as_slice(), b.as_slice(), "repeated runs must be bit-identical");
    }

    #[test]
    fn grayscale_equals_replicated_channels() {
        let gray = GrayImage::from_fn(300, 400, |x, y| Luma([((x * 7 + y * 3) % 256) as u8]));
        let replicated = RgbImage::from_fn(300, 400, |x, y| {
            let l = ((x * 7 + y * 3) % 256) as u8;
            Rgb([l, l, l])
        });

        let from_gray = preprocess(&DynamicImage::ImageLuma8(gray)).unwrap();
        let from_rgb = preprocess(&DynamicImage::ImageRgb8(replicated)).unwrap();
        assert_eq!(from_gray.as_slice(), from_rgb.as_slice());
    }

    #[test]
    fn normalization_applies_mean_std() {
        // A constant mid-gray image: every normalized value must equal
        // (0.5019... - mean[c]) / std[c] for its channel.
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(256, 256, Rgb([128, 128, 128])));
        let tensor = preprocess(&img).unwrap();

        let plane = (CROP_SIZE * CROP_SIZE) as usize;
        for c in 0..CHANNELS {
            let expected = (128.0 / 255.0 - MEAN[c]) / STD[c];
            let got = tensor.as_slice()[c * plane];
            assert!(
                (got - expected).abs() < 1e-6,
                "channel {c}: got {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn zero_sized_image_is_invalid() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let err = preprocess(&img).unwrap_err();
        assert!(matches!(err, VisionError::InvalidImage { .. }));
    }

    #[test]
    fn missing_file_is_decode_error() {
        let err = open_image(Path::new("/nonexistent/dog.jpg")).unwrap_err();
        assert!(matches!(err, VisionError::Decode { .. }));
    }

    #[test]
    fn values_are_within_standardized_range() {
        // (0/255 - 0.485) / 0.229 ≈ -2.12 and (255/255 - 0.406) / 0.225 ≈ 2.64
        // bound all channels.
        let tensor = preprocess(&gradient_rgb(320, 240)).unwrap();
        for &v in tensor.as_slice() {
            assert!((-3.0..=3.0).contains(&v), "value {v} outside expected range");
        }
    }
}
