// Core algorithm exports
pub mod crush;
pub mod ranker;
pub mod runner;
pub mod scoring;

pub use crush::CrushIndex;
pub use ranker::Ranker;
pub use runner::{CampaignReport, MatchRunner, MatchSink, Snapshot, StoreError, SurveySnapshotStore};
pub use scoring::calculate_compatibility;

use thiserror::Error;

/// Errors surfaced by the matching engine.
///
/// Scoring itself is total and never fails; only missing preconditions and
/// collaborator I/O can.
#[derive(Debug, Error)]
pub enum MatchingError {
    /// The subject has no completed survey: a user-correctable
    /// precondition, mapped to a 400 by the HTTP layer
    #[error("user has not completed the survey")]
    SurveyNotCompleted,

    #[error("failed to load survey snapshot: {0}")]
    Snapshot(#[source] StoreError),

    #[error("failed to persist matches for {user_id}: {source}")]
    Persistence {
        user_id: String,
        #[source]
        source: StoreError,
    },
}
