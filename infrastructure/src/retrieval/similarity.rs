//! Cosine similarity and ranking over embedding vectors.

/// Cosine similarity of two equal-length vectors.
///
/// Returns `None` on a length mismatch or an empty vector, and `0.0` when
/// either vector has zero norm.
pub fn cosine_similarity(query: &[f32], candidate: &[f32]) -> Option<f32> {
    if query.is_empty() || query.len() != candidate.len() {
        return None;
    }

    let (mut dot, mut query_sq, mut candidate_sq) = (0.0f32, 0.0f32, 0.0f32);
    for (q, c) in query.iter().zip(candidate) {
        dot += q * c;
        query_sq += q * q;
        candidate_sq += c * c;
    }

    let denom = query_sq.sqrt() * candidate_sq.sqrt();
    if denom <= f32::EPSILON {
        return Some(0.0);
    }
    Some(dot / denom)
}

/// Indices of the `k` candidates most similar to `query`, best first.
///
/// Candidates whose length differs from the query, or whose score is NaN
/// (overflowing components), are skipped. Ties keep index order.
pub fn top_k_by_cosine<'a, I>(query: &[f32], candidates: I, k: usize) -> Vec<(usize, f32)>
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let mut scored: Vec<(usize, f32)> = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(idx, candidate)| cosine_similarity(query, candidate).map(|s| (idx, s)))
        .filter(|(_, score)| !score.is_nan())
        .collect();

    scored.sort_by(|left, right| right.1.total_cmp(&left.1));
    scored.truncate(k);
    scored
}
