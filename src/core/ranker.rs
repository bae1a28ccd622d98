use crate::core::crush::CrushIndex;
use crate::core::scoring::calculate_compatibility;
use crate::core::MatchingError;
use crate::models::{MatchCandidate, ScoringWeights, SurveyProfile};

/// Candidate ranker: scores one subject against the full completed-survey
/// pool and produces an ordered, truncated candidate list.
///
/// # Ordering
/// Mutual-crush candidates always precede non-mutual ones regardless of
/// score; within each partition candidates are in descending score order.
/// The sort is stable, so score ties keep pool order and repeated runs over
/// the same snapshot are deterministic.
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Rank every other profile in the pool against the subject.
    ///
    /// Returns `SurveyNotCompleted` when the subject has no profile in the
    /// pool. An empty candidate list (nobody else completed the survey) is
    /// an empty result, not an error.
    pub fn rank(
        &self,
        subject_id: &str,
        pool: &[SurveyProfile],
        crushes: &CrushIndex,
        limit: usize,
    ) -> Result<Vec<MatchCandidate>, MatchingError> {
        let subject = pool
            .iter()
            .find(|p| p.user_id == subject_id)
            .ok_or(MatchingError::SurveyNotCompleted)?;

        let mut candidates: Vec<MatchCandidate> = pool
            .iter()
            .filter(|p| p.user_id != subject_id)
            .map(|other| MatchCandidate {
                target_user_id: other.user_id.clone(),
                // Subject always first: the sub-scores are direction-sensitive
                score: calculate_compatibility(subject, other, &self.weights),
                is_mutual_crush: crushes.is_mutual(subject_id, &other.user_id),
            })
            .collect();

        // Stable sort: mutual partition first, then by score (descending)
        candidates.sort_by(|a, b| {
            b.is_mutual_crush.cmp(&a.is_mutual_crush).then_with(|| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });

        candidates.truncate(limit);

        Ok(candidates)
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CrushDeclaration;

    fn profile(id: &str, personality: &str, interests: &[&str]) -> SurveyProfile {
        SurveyProfile {
            user_id: id.to_string(),
            email: format!("{}@campus.edu", id),
            personality_type: personality.to_string(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            values: vec!["honesty".to_string()],
            lifestyle: "active".to_string(),
            is_complete: true,
        }
    }

    fn mutual_index(pool: &[SurveyProfile], a: &str, b: &str) -> CrushIndex {
        let declarations = vec![
            CrushDeclaration {
                user_id: a.to_string(),
                crush_email: format!("{}@campus.edu", b),
                rank: 1,
            },
            CrushDeclaration {
                user_id: b.to_string(),
                crush_email: format!("{}@campus.edu", a),
                rank: 1,
            },
        ];
        CrushIndex::build(pool, &declarations)
    }

    #[test]
    fn test_subject_missing_from_pool() {
        let ranker = Ranker::with_default_weights();
        let pool = vec![profile("u1", "INTJ", &[])];

        let err = ranker
            .rank("ghost", &pool, &CrushIndex::default(), 7)
            .unwrap_err();
        assert!(matches!(err, MatchingError::SurveyNotCompleted));
    }

    #[test]
    fn test_subject_excluded_from_candidates() {
        let ranker = Ranker::with_default_weights();
        let pool = vec![
            profile("u1", "INTJ", &["chess"]),
            profile("u2", "INTJ", &["chess"]),
        ];

        let candidates = ranker.rank("u1", &pool, &CrushIndex::default(), 7).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].target_user_id, "u2");
    }

    #[test]
    fn test_pool_of_one_yields_empty_result() {
        let ranker = Ranker::with_default_weights();
        let pool = vec![profile("u1", "INTJ", &[])];

        let candidates = ranker.rank("u1", &pool, &CrushIndex::default(), 7).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_limit_larger_than_pool_is_not_an_error() {
        let ranker = Ranker::with_default_weights();
        let pool: Vec<SurveyProfile> = (1..=5).map(|i| profile(&format!("u{}", i), "INTJ", &[])).collect();

        let candidates = ranker.rank("u1", &pool, &CrushIndex::default(), 7).unwrap();
        assert_eq!(candidates.len(), 4);
    }

    #[test]
    fn test_truncates_to_limit() {
        let ranker = Ranker::with_default_weights();
        let pool: Vec<SurveyProfile> = (1..=10).map(|i| profile(&format!("u{}", i), "INTJ", &[])).collect();

        let candidates = ranker.rank("u1", &pool, &CrushIndex::default(), 3).unwrap();
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn test_sorted_by_descending_score() {
        let ranker = Ranker::with_default_weights();
        let pool = vec![
            profile("u1", "INTJ", &["chess", "hiking"]),
            profile("u2", "ESTP", &[]),              // incompatible, no interests
            profile("u3", "INTJ", &["chess", "hiking"]), // compatible, full overlap
        ];

        let candidates = ranker.rank("u1", &pool, &CrushIndex::default(), 7).unwrap();
        assert_eq!(candidates[0].target_user_id, "u3");
        assert!(candidates[0].score > candidates[1].score);
    }

    #[test]
    fn test_mutual_crush_outranks_higher_score() {
        let ranker = Ranker::with_default_weights();
        let pool = vec![
            profile("u1", "INTJ", &["chess", "hiking"]),
            profile("u2", "ESTP", &["running"]), // low score, mutual crush
            profile("u3", "INTJ", &["chess", "hiking"]), // high score, no crush
        ];
        let index = mutual_index(&pool, "u1", "u2");

        let candidates = ranker.rank("u1", &pool, &index, 7).unwrap();
        assert_eq!(candidates[0].target_user_id, "u2");
        assert!(candidates[0].is_mutual_crush);
        assert!(candidates[0].score < candidates[1].score);
    }

    #[test]
    fn test_score_ties_keep_pool_order() {
        let ranker = Ranker::with_default_weights();
        // Identical profiles score identically; stable sort keeps pool order
        let pool: Vec<SurveyProfile> = (1..=6).map(|i| profile(&format!("u{}", i), "INTJ", &["chess"])).collect();

        let first = ranker.rank("u1", &pool, &CrushIndex::default(), 7).unwrap();
        let second = ranker.rank("u1", &pool, &CrushIndex::default(), 7).unwrap();

        let order: Vec<&str> = first.iter().map(|c| c.target_user_id.as_str()).collect();
        assert_eq!(order, vec!["u2", "u3", "u4", "u5", "u6"]);
        assert_eq!(first, second);
    }
}
