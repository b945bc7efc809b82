//! Fixed geometry and normalization constants for ImageNet classifiers.
//!
//! Every torchvision-style ImageNet model shares the same input contract:
//! resize the shorter side to 256, center-crop to 224×224, scale pixels to
//! [0,1], then standardize per channel. The constants here are that contract;
//! they never vary per model or per input.

/// Target length of the shorter image side before cropping.
pub const RESIZE_SHORTER: u32 = 256;

/// Side length of the square center crop fed to the model.
pub const CROP_SIZE: u32 = 224;

/// Input channel count after RGB coercion.
pub const CHANNELS: usize = 3;

/// Number of ImageNet-1k classes in the output vector.
pub const CLASS_COUNT: usize = 1000;

/// Per-channel mean (RGB order) subtracted after scaling to [0,1].
pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// Per-channel standard deviation (RGB order) divided out after mean removal.
pub const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Flat element count of one normalized input tensor (3 × 224 × 224).
pub const TENSOR_LEN: usize = CHANNELS * (CROP_SIZE as usize) * (CROP_SIZE as usize);
