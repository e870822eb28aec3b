use crate::knowledge::CandidateIds;

use super::ranker::RankScores;

/// Pick the highest-scoring candidate of one mention.
///
/// Candidates absent from `scores` count as 0. Ties go to the smallest id,
/// which the ordered candidate set yields first. Returns `None` only for an
/// empty candidate set.
pub fn select(candidates: &CandidateIds, scores: &RankScores) -> Option<(String, f64)> {
    let mut best: Option<(&String, f64)> = None;

    for id in candidates {
        let score = scores.get(id).unwrap_or(0.0);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((id, score)),
        }
    }

    best.map(|(id, score)| (id.clone(), score))
}
