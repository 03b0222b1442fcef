/// Score-weighted selection of the winning continuation.

use crate::core::random::RandomSource;
use crate::schema::candidate::Candidate;

/// Sum of all positive scores. Non-positive candidates add nothing.
pub fn total_weight(candidates: &[Candidate]) -> u64 {
    candidates
        .iter()
        .map(Candidate::weight)
        .fold(0u64, u64::saturating_add)
}

/// Draw one candidate with probability proportional to its positive score.
///
/// Returns the winner's index into `candidates`, or `None` when nothing
/// carries weight (empty list, or every score `<= 0`).
pub fn pick_weighted_index<R>(candidates: &[Candidate], rng: &mut R) -> Option<usize>
where
    R: RandomSource + ?Sized,
{
    let total = total_weight(candidates);
    if total == 0 {
        return None;
    }

    // r is uniform in [0, total); the winner is the first candidate whose
    // cumulative weight passes r.
    let mut r = rng.next_below(total);
    for (i, candidate) in candidates.iter().enumerate() {
        let weight = candidate.weight();
        if weight == 0 {
            continue;
        }
        if r < weight {
            return Some(i);
        }
        r -= weight;
    }
    None
}

/// Like [`pick_weighted_index`] but returns the candidate itself.
pub fn pick_weighted<'a, R>(candidates: &'a [Candidate], rng: &mut R) -> Option<&'a Candidate>
where
    R: RandomSource + ?Sized,
{
    pick_weighted_index(candidates, rng).map(|i| &candidates[i])
}
