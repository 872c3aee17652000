//! Clause matching by embedding similarity.
//!
//! Matching is a linear argmax over the partner clauses of a single run, so
//! there is no index structure here, just the similarity math and the stable
//! selection rule.


/// Index and score of the winning candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    pub index: usize,
    pub score: f32,
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero magnitude or the lengths differ,
/// so callers never see NaN.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a_sq = 0.0f32;
    let mut norm_b_sq = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a_sq += x * x;
        norm_b_sq += y * y;
    }

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Finds the candidate most similar to `query`.
///
/// Returns `None` for an empty candidate list. Ties keep the earliest index.
/// No threshold is applied: a weak best candidate still wins.
pub fn best_match(query: &[f32], candidates: &[Vec<f32>]) -> Option<BestMatch> {
    let mut best: Option<BestMatch> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let score = cosine_similarity(query, candidate);
        let improves = match best {
            Some(ref current) => score > current.score,
            None => true,
        };

        if improves {
            best = Some(BestMatch { index, score });
        }
    }

    best
}
