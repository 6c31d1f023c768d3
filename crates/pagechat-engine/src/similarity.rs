// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cosine similarity between sparse term vectors.

use crate::embedder::TermVector;

/// Sum of `a[k] * b[k]` over the terms present in both vectors.
pub fn dot(a: &TermVector, b: &TermVector) -> u64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .map(|(term, count)| u64::from(count) * u64::from(large.get(term)))
        .sum()
}

/// Euclidean norm of the count vector.
pub fn magnitude(vector: &TermVector) -> f64 {
    let sum_of_squares: u64 = vector.iter().map(|(_, c)| u64::from(c) * u64::from(c)).sum();
    (sum_of_squares as f64).sqrt()
}

/// Cosine similarity in `[0, 1]`.
///
/// Returns 0 when either vector is empty. The result is clamped to 1 to
/// absorb rounding on identical vectors.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let (mag_a, mag_b) = (magnitude(a), magnitude(b));
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    (dot(a, b) as f64 / (mag_a * mag_b)).min(1.0)
}
