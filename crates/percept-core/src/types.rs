//! Shared result types for classification.

use serde::{Deserialize, Serialize};

/// A WordNet synset identifier paired with its human-readable class name.
///
/// Example: `("n02109961", "Eskimo_dog")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPair {
    /// Stable WordNet key, e.g. `n02109961`.
    pub synset: String,
    /// Display name, e.g. `Eskimo_dog`.
    pub name: String,
}

impl LabelPair {
    pub fn new(synset: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            synset: synset.into(),
            name: name.into(),
        }
    }
}

/// One ranked classification result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Class index into the 1000-element score vector.
    pub class_index: usize,
    /// Softmax probability of this class.
    pub score: f32,
    /// Resolved label for `class_index`.
    pub label: LabelPair,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_pair_json_roundtrip() {
        let pair = LabelPair::new("n02109961", "Eskimo_dog");
        let json = serde_json::to_string(&pair).unwrap();
        let parsed: LabelPair = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pair);
    }
}
