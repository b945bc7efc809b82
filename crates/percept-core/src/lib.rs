pub mod imagenet;
pub mod score;
pub mod types;

pub use score::{argmax, softmax};
pub use types::{LabelPair, Prediction};
