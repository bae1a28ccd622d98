use crate::models::{CrushDeclaration, SurveyProfile};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Precomputed reciprocal-crush index for one snapshot.
///
/// Built once per batch pass so mutuality checks during ranking are O(1)
/// instead of a per-pair lookup against the store. Holds the set of
/// normalized unordered user-id pairs where both directions are declared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrushIndex {
    pairs: HashSet<(String, String)>,
}

impl CrushIndex {
    /// Build the index from a profile snapshot and all crush declarations.
    ///
    /// Declarations identify their target by email; they are resolved to
    /// user ids via the snapshot (case-insensitive) and declarations whose
    /// email matches no completed profile are dropped.
    pub fn build(profiles: &[SurveyProfile], declarations: &[CrushDeclaration]) -> Self {
        let id_by_email: HashMap<String, &str> = profiles
            .iter()
            .map(|p| (p.email.to_lowercase(), p.user_id.as_str()))
            .collect();

        // Directed edges declarer -> target, on user ids
        let mut declared: HashSet<(&str, &str)> = HashSet::new();
        for decl in declarations {
            if let Some(&target) = id_by_email.get(&decl.crush_email.to_lowercase()) {
                declared.insert((decl.user_id.as_str(), target));
            }
        }

        let mut pairs = HashSet::new();
        for &(from, to) in &declared {
            if declared.contains(&(to, from)) {
                pairs.insert(normalize_pair(from, to));
            }
        }

        Self { pairs }
    }

    /// Whether both participants declared each other. Symmetric.
    pub fn is_mutual(&self, a: &str, b: &str) -> bool {
        self.pairs.contains(&normalize_pair(a, b))
    }

    /// Number of reciprocal pairs in this snapshot
    pub fn mutual_pair_count(&self) -> usize {
        self.pairs.len()
    }
}

fn normalize_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, email: &str) -> SurveyProfile {
        SurveyProfile {
            user_id: id.to_string(),
            email: email.to_string(),
            personality_type: "INTJ".to_string(),
            interests: vec![],
            values: vec![],
            lifestyle: "active".to_string(),
            is_complete: true,
        }
    }

    fn declaration(user_id: &str, crush_email: &str, rank: i32) -> CrushDeclaration {
        CrushDeclaration {
            user_id: user_id.to_string(),
            crush_email: crush_email.to_string(),
            rank,
        }
    }

    #[test]
    fn test_mutual_pair_detected() {
        let profiles = vec![profile("u1", "ana@campus.edu"), profile("u2", "ben@campus.edu")];
        let declarations = vec![
            declaration("u1", "ben@campus.edu", 1),
            declaration("u2", "ana@campus.edu", 2),
        ];

        let index = CrushIndex::build(&profiles, &declarations);
        assert!(index.is_mutual("u1", "u2"));
        assert!(index.is_mutual("u2", "u1"));
        assert_eq!(index.mutual_pair_count(), 1);
    }

    #[test]
    fn test_one_directional_is_not_mutual() {
        let profiles = vec![profile("u1", "ana@campus.edu"), profile("u2", "ben@campus.edu")];
        let declarations = vec![declaration("u1", "ben@campus.edu", 1)];

        let index = CrushIndex::build(&profiles, &declarations);
        assert!(!index.is_mutual("u1", "u2"));
        assert_eq!(index.mutual_pair_count(), 0);
    }

    #[test]
    fn test_email_comparison_is_case_insensitive() {
        let profiles = vec![profile("u1", "Ana@Campus.edu"), profile("u2", "ben@campus.edu")];
        let declarations = vec![
            declaration("u1", "BEN@campus.edu", 1),
            declaration("u2", "ana@campus.edu", 1),
        ];

        let index = CrushIndex::build(&profiles, &declarations);
        assert!(index.is_mutual("u1", "u2"));
    }

    #[test]
    fn test_unresolvable_email_is_ignored() {
        let profiles = vec![profile("u1", "ana@campus.edu")];
        let declarations = vec![declaration("u1", "nobody@campus.edu", 1)];

        let index = CrushIndex::build(&profiles, &declarations);
        assert_eq!(index.mutual_pair_count(), 0);
    }

    #[test]
    fn test_unknown_users_are_not_mutual() {
        let index = CrushIndex::build(&[], &[]);
        assert!(!index.is_mutual("ghost1", "ghost2"));
    }
}
