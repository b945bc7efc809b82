//! ONNX Runtime classification pipeline for ImageNet models.
//!
//! Wraps a frozen `.onnx` classifier (e.g. ResNet-18 or MobileNet v2 from
//! the ONNX model zoo) behind a single forward-pass call. ONNX Runtime is
//! inference-only, so weights are never updated and no gradients exist.

use std::path::Path;

use ort::session::Session;
use ort::value::Tensor;
use thiserror::Error;
use tracing::info;

use percept_core::imagenet::CLASS_COUNT;

use crate::vision::ImageTensor;

#[derive(Debug, Error)]
pub enum InferError {
    #[error("model file not found: {0}")]
    ModelNotFound(std::path::PathBuf),

    #[error("model declares no inputs")]
    NoInputs,

    #[error("unexpected output shape {got:?}, expected [1, {CLASS_COUNT}]")]
    Shape { got: Vec<i64> },

    #[error("onnx runtime: {0}")]
    Ort(#[from] ort::Error),
}

/// Frozen image classifier backed by an ONNX Runtime session.
///
/// Read-only after [`load`](Classifier::load); safe to share by reference.
/// Running takes `&mut self` because the session owns scratch buffers.
#[derive(Debug)]
pub struct Classifier {
    session: Session,
    input_name: String,
}

impl Classifier {
    /// Build a session from a `.onnx` file.
    ///
    /// If the model declares a fixed-size output, its class dimension must
    /// be [`CLASS_COUNT`]; dynamic output shapes are checked at run time
    /// instead.
    pub fn load(model_path: &Path) -> Result<Self, InferError> {
        if !model_path.exists() {
            return Err(InferError::ModelNotFound(model_path.to_path_buf()));
        }

        let session = Session::builder()?.commit_from_file(model_path)?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .ok_or(InferError::NoInputs)?;

        if let Some(output) = session.outputs().first()
            && let Some(classes) = declared_class_count(output.dtype())
            && classes != CLASS_COUNT as i64
        {
            return Err(InferError::Shape {
                got: vec![1, classes],
            });
        }

        info!(model = %model_path.display(), input = %input_name, "loaded classifier");
        Ok(Self {
            session,
            input_name,
        })
    }

    /// Single forward pass over one normalized image.
    ///
    /// Returns the raw 1000-element score vector (logits). Deterministic
    /// for fixed weights and a fixed input.
    pub fn scores(&mut self, input: &ImageTensor) -> Result<Vec<f32>, InferError> {
        let tensor =
            Tensor::from_array((input.shape(), input.as_slice().to_vec().into_boxed_slice()))?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => tensor])?;

        let (shape, data) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: &[i64] = shape;
        if dims != [1, CLASS_COUNT as i64] {
            return Err(InferError::Shape {
                got: dims.to_vec(),
            });
        }

        Ok(data.to_vec())
    }
}

/// Class dimension from the declared output type, if the model fixes one.
fn declared_class_count(output_type: &ort::value::ValueType) -> Option<i64> {
    match output_type {
        ort::value::ValueType::Tensor { shape, .. } => {
            shape.last().copied().filter(|&d| d > 0)
        }
        _ => None,
    }
}
