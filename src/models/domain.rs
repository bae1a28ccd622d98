use serde::{Deserialize, Serialize};

/// Snapshot of one participant's completed survey
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    #[serde(rename = "personalityType")]
    pub personality_type: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub lifestyle: String,
    #[serde(rename = "isComplete", default = "default_true")]
    pub is_complete: bool,
}

fn default_true() -> bool {
    true
}

/// A declared crush: one row of a participant's (up to 5) ranked targets.
///
/// Targets are identified by the email entered on the survey; the
/// crush index resolves them to user ids against the profile snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrushDeclaration {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "crushEmail")]
    pub crush_email: String,
    /// 1-5, priority ranking
    pub rank: i32,
}

/// Scored candidate produced while ranking one participant.
/// Transient: discarded once the ranked set is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub target_user_id: String,
    pub score: f64,
    pub is_mutual_crush: bool,
}

/// Persisted match record. Directional: (A, B) does not imply (B, A).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "matchedUserId")]
    pub matched_user_id: String,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: f64,
    /// 1-based dense rank within this user's match set
    pub rank: i32,
    #[serde(rename = "isMutualCrush")]
    pub is_mutual_crush: bool,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Scoring weights for the compatibility sub-scores.
///
/// `mutual_crush` is part of the weight table but is never folded into the
/// numeric score; crush reciprocity is applied as a ranking boost instead,
/// so the persisted score stays explainable from survey data alone.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub personality: f64,
    pub interests: f64,
    pub values: f64,
    pub lifestyle: f64,
    pub mutual_crush: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            personality: 0.30,
            interests: 0.25,
            values: 0.25,
            lifestyle: 0.10,
            mutual_crush: 0.10,
        }
    }
}
