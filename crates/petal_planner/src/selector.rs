use crate::{
    error::PlannerError,
    score::{Score, ScoreMap, ScoredCandidate},
};

pub trait SelectCandidate {
    fn select_candidate<'a>(&self, scores: &'a ScoreMap) -> Option<&'a ScoredCandidate>;
}

/// Picks the lowest score. On ties the lowest index wins.
pub struct SelectBestCandidate;

impl SelectCandidate for SelectBestCandidate {
    fn select_candidate<'a>(&self, scores: &'a ScoreMap) -> Option<&'a ScoredCandidate> {
        let mut best_score: Option<Score> = None;
        let mut best_candidate = None;

        for scored in scores.values() {
            if best_score.is_none_or(|best| scored.score < best) {
                best_candidate = Some(scored);
                best_score = Some(scored.score);
            }
        }

        best_candidate
    }
}

/// Fails with [`PlannerError::NoCandidates`] when nothing was scored.
pub fn select<'a>(
    selector: &impl SelectCandidate,
    scores: &'a ScoreMap,
) -> Result<&'a ScoredCandidate, PlannerError> {
    selector
        .select_candidate(scores)
        .ok_or(PlannerError::NoCandidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::ScoreAnalysis;

    fn scored(index: usize, score: f64) -> (usize, ScoredCandidate) {
        (
            index,
            ScoredCandidate {
                index,
                score: Score::new(score),
                analysis: ScoreAnalysis::default(),
            },
        )
    }

    #[test]
    fn empty_map_has_no_candidates() {
        let scores = ScoreMap::new();
        assert!(matches!(
            select(&SelectBestCandidate, &scores),
            Err(PlannerError::NoCandidates)
        ));
    }

    #[test]
    fn selects_the_minimum() {
        let scores: ScoreMap = [scored(0, 0.4), scored(3, 0.1), scored(7, 0.2)]
            .into_iter()
            .collect();
        assert_eq!(select(&SelectBestCandidate, &scores).unwrap().index, 3);
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let scores: ScoreMap = [scored(9, 0.1), scored(2, 0.1), scored(5, 0.3)]
            .into_iter()
            .collect();
        assert_eq!(select(&SelectBestCandidate, &scores).unwrap().index, 2);
    }
}
