//! Dissimilarity scoring between image vectors.

use crate::types::{SimilarityMatch, VisionError, VisionResult};
use crate::vector::{magnitude, ImageVector};

/// Largest possible distance between two unit vectors (exact opposites).
const MAX_UNIT_DISTANCE: f64 = 2.0;

/// Compute how different two vectors are, from 0.0 (same) to 1.0 (opposite).
///
/// Fails with [`VisionError::DimensionMismatch`] when the vectors were built
/// with different channel counts.
pub fn diff(a: &ImageVector, b: &ImageVector) -> VisionResult<f64> {
    if a.dimensions() != b.dimensions() {
        return Err(VisionError::DimensionMismatch {
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }

    let sub: Vec<f64> = a.iter().zip(b.iter()).map(|(x, y)| x - y).collect();
    // Rounding can push exact opposites a hair past 1.
    let score = (magnitude(&sub) / MAX_UNIT_DISTANCE).min(1.0);

    tracing::debug!(dimensions = a.dimensions(), score, "Computed vector diff");
    Ok(score)
}

/// Find the `top_k` candidates closest to `query` with a diff of at most `max_diff`.
///
/// Candidates with a different dimension are skipped. Results are ordered from
/// most to least similar.
pub fn find_similar(
    query: &ImageVector,
    candidates: &[ImageVector],
    top_k: usize,
    max_diff: f64,
) -> Vec<SimilarityMatch> {
    let mut matches: Vec<SimilarityMatch> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            diff(query, candidate)
                .ok()
                .map(|diff| SimilarityMatch { index, diff })
        })
        .filter(|m| m.diff <= max_diff)
        .collect();

    matches.sort_by(|a, b| a.diff.partial_cmp(&b.diff).unwrap_or(std::cmp::Ordering::Equal));
    matches.truncate(top_k);
    matches
}
