use crate::models::{ScoringWeights, SurveyProfile};
use std::collections::HashSet;

/// Calculate a compatibility score (0-100) between two survey profiles
///
/// Scoring formula:
/// score = (
///     personality_score * 0.30 +   # curated type-affinity table
///     interests_score * 0.25 +     # shared interests over A's unique set
///     values_score * 0.25 +        # shared values over B's set
///     lifestyle_score * 0.10       # exact lifestyle match
/// )
///
/// The `mutual_crush` weight in the table is intentionally absent from the
/// sum: reciprocity is a ranking boost, never part of the persisted score.
/// The first argument is always the profile being ranked for; the interests
/// and values sub-scores are direction-sensitive.
pub fn calculate_compatibility(
    a: &SurveyProfile,
    b: &SurveyProfile,
    weights: &ScoringWeights,
) -> f64 {
    let personality_score = calculate_personality_match(&a.personality_type, &b.personality_type);
    let interests_score = calculate_interests_overlap(&a.interests, &b.interests);
    let values_score = calculate_values_alignment(&a.values, &b.values);
    let lifestyle_score = calculate_lifestyle_match(&a.lifestyle, &b.lifestyle);

    let total = personality_score * weights.personality
        + interests_score * weights.interests
        + values_score * weights.values
        + lifestyle_score * weights.lifestyle;

    total.min(100.0)
}

/// Compatible personality codes, author-curated and symmetric.
/// Each code lists itself, so an exact match always scores 85.
fn compatible_types(personality: &str) -> Option<&'static [&'static str]> {
    match personality {
        "INTJ" => Some(&["INTJ", "INTP", "INFJ", "ENTJ"]),
        "INTP" => Some(&["INTP", "INTJ", "ENTP", "INFP"]),
        "INFJ" => Some(&["INFJ", "INTJ", "INFP", "ENFJ"]),
        "INFP" => Some(&["INFP", "INFJ", "INTP", "ENFP"]),
        "ENTJ" => Some(&["ENTJ", "INTJ", "ENTP", "ESTJ"]),
        "ENTP" => Some(&["ENTP", "INTP", "ENTJ", "ESTP"]),
        "ENFJ" => Some(&["ENFJ", "INFJ", "ENFP", "ESFJ"]),
        "ENFP" => Some(&["ENFP", "INFP", "ENFJ", "ENTP"]),
        _ => None,
    }
}

/// Personality sub-score: 85.0 for compatible (or identical) codes,
/// otherwise the 60.0 baseline. Unknown codes fall to the baseline
/// rather than erroring.
#[inline]
fn calculate_personality_match(type_a: &str, type_b: &str) -> f64 {
    match compatible_types(type_a) {
        Some(types) if types.contains(&type_b) => 85.0,
        _ => 60.0,
    }
}

/// Interests sub-score: base 40 plus the share of A's unique interests
/// that B also lists, capped at 100. An empty set on either side is a
/// neutral 50.0 default, never a penalty.
///
/// The denominator is A's unique interest count, so scoring A against B
/// need not equal B against A.
#[inline]
fn calculate_interests_overlap(interests_a: &[String], interests_b: &[String]) -> f64 {
    if interests_a.is_empty() || interests_b.is_empty() {
        return 50.0;
    }

    let unique: HashSet<&str> = interests_a.iter().map(String::as_str).collect();
    let overlap = interests_b
        .iter()
        .filter(|i| unique.contains(i.as_str()))
        .count();

    let percentage = overlap as f64 / unique.len() as f64 * 100.0;
    (percentage + 40.0).min(100.0)
}

/// Values sub-score: base 30 plus the share of B's values that A also
/// holds, capped at 100. Empty set on either side is the 50.0 default.
///
/// Here the denominator is B's value count, the opposite direction from
/// the interests sub-score. The asymmetry is deliberate and relied on by
/// the ranker, which always passes the subject profile first.
#[inline]
fn calculate_values_alignment(values_a: &[String], values_b: &[String]) -> f64 {
    if values_a.is_empty() || values_b.is_empty() {
        return 50.0;
    }

    let held: HashSet<&str> = values_a.iter().map(String::as_str).collect();
    let matched = values_b
        .iter()
        .filter(|v| held.contains(v.as_str()))
        .count();

    let percentage = matched as f64 / values_b.len() as f64 * 100.0;
    (percentage + 30.0).min(100.0)
}

/// Lifestyle sub-score: 90.0 for an exact match, else 60.0.
#[inline]
fn calculate_lifestyle_match(lifestyle_a: &str, lifestyle_b: &str) -> f64 {
    if lifestyle_a == lifestyle_b {
        90.0
    } else {
        60.0
    }
}
