//! AI inference layer: ImageNet preprocessing, ONNX Runtime classification,
//! and class-index to label resolution.

#[cfg(feature = "onnx")]
mod classifier;
#[cfg(feature = "onnx")]
pub use classifier::{Classifier, InferError};

pub mod labels;
pub mod vision;

pub use labels::{LabelError, LabelTable};
pub use vision::{ImageTensor, VisionError, open_image, preprocess};
