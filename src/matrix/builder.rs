use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::similarity::cosine_similarity;
use super::types::SimilarityMatrix;
use crate::store::VectorStore;

/// Knobs for the pairwise phase.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Replace non-finite similarities (zero-norm vectors) with 0.0.
    pub clamp_degenerate: bool,
    /// Emit `[matrix] row …` lines to stderr as rows complete.
    pub progress: bool,
}

/// Build the complete N×N similarity matrix for `store`.
///
/// Only the upper triangle (including the diagonal) is computed — one kernel
/// invocation per unordered pair — and each value is mirrored to the lower
/// triangle, so the matrix is symmetric bit-for-bit. The diagonal is computed,
/// not assumed to be 1.0, so zero-norm vectors keep their 0/0 self-similarity.
///
/// Rows are independent, so their upper-triangle segments are computed in
/// parallel; each task owns exactly one row's `j >= i` cells and the mirror
/// writes happen in a single assembly pass afterwards. The result does not
/// depend on the schedule.
pub fn build_matrix(store: &VectorStore, options: &BuildOptions) -> SimilarityMatrix {
    let n = store.len();
    let completed = AtomicUsize::new(0);
    let stride = (n / 20).max(1);

    let segments: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            let left = store.get(i);
            let mut segment = Vec::with_capacity(n - i);
            for j in i..n {
                let mut s = cosine_similarity(left, store.get(j));
                if options.clamp_degenerate && !s.is_finite() {
                    s = 0.0;
                }
                segment.push(s);
            }
            if options.progress {
                // Rows finish out of order under the parallel schedule.
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if done % stride == 0 || done == n {
                    eprintln!("[matrix] row {}/{}", done, n);
                }
            }
            segment
        })
        .collect();

    let mut matrix = SimilarityMatrix::zeroed(n);
    for (i, segment) in segments.iter().enumerate() {
        for (offset, &s) in segment.iter().enumerate() {
            let j = i + offset;
            matrix.set(i, j, s);
            if i != j {
                matrix.set(j, i, s);
            }
        }
    }
    matrix
}
