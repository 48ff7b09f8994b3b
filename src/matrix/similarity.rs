use crate::vector::SparseVector;

/// Cosine similarity between two sparse vectors: dot(a, b) / (‖a‖ · ‖b‖).
///
/// If either norm is zero the division yields NaN; that value is returned
/// as-is and propagates to the output. Callers that cannot tolerate
/// non-finite cells opt into clamping at the builder level.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let dot = if a.nnz() <= b.nnz() {
        sparse_dot(a, b)
    } else {
        sparse_dot(b, a)
    };
    dot / (norm(a) * norm(b))
}

/// Dot product over shared indices, iterating the smaller vector and probing
/// the larger one. Cost is O(min(|a|,|b|) · log max(|a|,|b|)).
fn sparse_dot(smaller: &SparseVector, larger: &SparseVector) -> f64 {
    let mut dot = 0.0;
    for (index, weight) in smaller.iter() {
        if let Some(other) = larger.get(index) {
            dot += weight as f64 * other as f64;
        }
    }
    dot
}

/// Euclidean norm; squared weights accumulate in f64.
fn norm(v: &SparseVector) -> f64 {
    let mut sum = 0.0;
    for (_, weight) in v.iter() {
        sum += weight as f64 * weight as f64;
    }
    sum.sqrt()
}
