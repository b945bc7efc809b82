//! Score-vector reduction: argmax and a numerically stable softmax.

/// Index of the maximum element, ties broken by lowest index.
///
/// Returns `None` for an empty slice. NaN scores never win a comparison,
/// so a vector of all-NaN collapses to index 0.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    if scores.is_empty() {
        return None;
    }

    let mut best = 0;
    for (i, &s) in scores.iter().enumerate().skip(1) {
        // Strictly greater keeps the earliest index on ties.
        if s > scores[best] {
            best = i;
        }
    }
    Some(best)
}

/// Softmax over raw logits, max-subtracted for numerical stability.
///
/// An empty input yields an empty output.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let Some(&max) = logits
        .iter()
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    else {
        return vec![];
    };

    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
