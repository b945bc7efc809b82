//! ImageNet class-index label table.
//!
//! The canonical document is a JSON object keyed by string-encoded class
//! index, each value a `[synset_id, label]` pair:
//!
//! ```json
//! {"0": ["n01440764", "tench"], ..., "208": ["n02109961", "Eskimo_dog"], ...}
//! ```
//!
//! Loaded once at startup (from disk or via `percept-fetch`) and never
//! mutated afterwards.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use percept_core::imagenet::CLASS_COUNT;
use percept_core::{LabelPair, Prediction, softmax};

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("failed to read label file {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("malformed label table: {0}")]
    Format(String),

    #[error("class index {index} outside label table domain (0..{limit})")]
    Lookup { index: usize, limit: usize },
}

/// Immutable class-index → label-pair mapping.
#[derive(Debug)]
pub struct LabelTable {
    entries: HashMap<usize, LabelPair>,
}

impl LabelTable {
    /// Parse the canonical JSON document.
    ///
    /// Rejects anything that is not an object of `"<int>": [synset, label]`
    /// entries with indices below [`CLASS_COUNT`]. Nothing of a rejected
    /// document is retained.
    pub fn from_json_str(doc: &str) -> Result<Self, LabelError> {
        let raw: HashMap<String, (String, String)> = serde_json::from_str(doc)
            .map_err(|e| LabelError::Format(e.to_string()))?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (key, (synset, name)) in raw {
            let index: usize = key
                .parse()
                .map_err(|_| LabelError::Format(format!("non-integer class key {key:?}")))?;
            if index >= CLASS_COUNT {
                return Err(LabelError::Format(format!(
                    "class index {index} exceeds {CLASS_COUNT} classes"
                )));
            }
            entries.insert(index, LabelPair::new(synset, name));
        }

        info!(classes = entries.len(), "loaded label table");
        Ok(Self { entries })
    }

    /// Load the document from a local file.
    pub fn from_path(path: &Path) -> Result<Self, LabelError> {
        let doc = std::fs::read_to_string(path).map_err(|source| LabelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&doc)
    }

    /// Number of classes in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a class index to its label pair.
    pub fn resolve(&self, index: usize) -> Result<&LabelPair, LabelError> {
        self.entries.get(&index).ok_or(LabelError::Lookup {
            index,
            limit: CLASS_COUNT,
        })
    }

    /// Rank a raw score vector and resolve the top `k` classes.
    ///
    /// Scores are converted to softmax probabilities; ties rank the lower
    /// class index first. Fails with [`LabelError::Lookup`] if a ranked
    /// index is missing from the table.
    pub fn top_k(&self, scores: &[f32], k: usize) -> Result<Vec<Prediction>, LabelError> {
        let probs = softmax(scores);

        let mut order: Vec<usize> = (0..probs.len()).collect();
        order.sort_by(|&a, &b| {
            probs[b]
                .partial_cmp(&probs[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });

        order
            .into_iter()
            .take(k)
            .map(|index| {
                let label = self.resolve(index)?.clone();
                Ok(Prediction {
                    class_index: index,
                    score: probs[index],
                    label,
                })
            })
            .collect()
    }
}
