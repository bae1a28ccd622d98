use crate::core::crush::CrushIndex;
use crate::core::ranker::Ranker;
use crate::core::MatchingError;
use crate::models::{CrushDeclaration, Match, SurveyProfile};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Collaborator error type: the runner only needs to carry it, not inspect it
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Read-only source of the completed-survey pool and crush declarations
#[async_trait]
pub trait SurveySnapshotStore: Send + Sync {
    async fn completed_profiles(&self) -> Result<Vec<SurveyProfile>, StoreError>;
    async fn crush_declarations(&self) -> Result<Vec<CrushDeclaration>, StoreError>;
}

/// Write side: persists a participant's ranked match set.
///
/// `replace_matches` must be atomic per user (delete-all then insert-all in
/// one unit) so a participant never observes a partially written list.
#[async_trait]
pub trait MatchSink: Send + Sync {
    async fn replace_matches(&self, user_id: &str, matches: &[Match]) -> Result<(), StoreError>;
    async fn matches_for(&self, user_id: &str) -> Result<Vec<Match>, StoreError>;
}

/// Frozen view of the campaign at one point in time.
///
/// Taken once per batch run and shared read-only by every participant's
/// regeneration; nobody observes another participant's mid-run writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub profiles: Vec<SurveyProfile>,
    pub crushes: CrushIndex,
}

impl Snapshot {
    pub fn from_parts(profiles: Vec<SurveyProfile>, declarations: &[CrushDeclaration]) -> Self {
        let crushes = CrushIndex::build(&profiles, declarations);
        Self { profiles, crushes }
    }

    pub fn participant_count(&self) -> usize {
        self.profiles.len()
    }
}

/// Outcome of one full-campaign run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignReport {
    pub participants: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Orchestrates match regeneration against the collaborator stores.
///
/// The full-campaign run is best-effort: a failure for one participant is
/// logged and skipped, the rest of the run continues.
pub struct MatchRunner<S, K> {
    store: Arc<S>,
    sink: Arc<K>,
    ranker: Ranker,
}

impl<S, K> Clone for MatchRunner<S, K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            sink: Arc::clone(&self.sink),
            ranker: self.ranker.clone(),
        }
    }
}

impl<S, K> MatchRunner<S, K>
where
    S: SurveySnapshotStore,
    K: MatchSink,
{
    pub fn new(store: Arc<S>, sink: Arc<K>, ranker: Ranker) -> Self {
        Self { store, sink, ranker }
    }

    /// Fetch a fresh snapshot from the store. Always bypasses any cache:
    /// every batch run observes the store as of its own start.
    pub async fn load_snapshot(&self) -> Result<Snapshot, MatchingError> {
        let profiles = self
            .store
            .completed_profiles()
            .await
            .map_err(MatchingError::Snapshot)?;
        let declarations = self
            .store
            .crush_declarations()
            .await
            .map_err(MatchingError::Snapshot)?;

        Ok(Snapshot::from_parts(profiles, &declarations))
    }

    /// Regenerate one participant's matches against an existing snapshot.
    ///
    /// Ranks, materializes dense-ranked `Match` rows, then atomically
    /// replaces the stored set. Idempotent over an unchanged snapshot.
    pub async fn regenerate_from_snapshot(
        &self,
        snapshot: &Snapshot,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Match>, MatchingError> {
        let candidates = self
            .ranker
            .rank(user_id, &snapshot.profiles, &snapshot.crushes, limit)?;

        let created_at = chrono::Utc::now();
        let matches: Vec<Match> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, candidate)| Match {
                user_id: user_id.to_string(),
                matched_user_id: candidate.target_user_id,
                compatibility_score: candidate.score,
                rank: i as i32 + 1,
                is_mutual_crush: candidate.is_mutual_crush,
                created_at,
            })
            .collect();

        self.sink
            .replace_matches(user_id, &matches)
            .await
            .map_err(|source| MatchingError::Persistence {
                user_id: user_id.to_string(),
                source,
            })?;

        Ok(matches)
    }

    /// Interactive single-participant regeneration: fresh snapshot, then
    /// rank and persist. Errors propagate to the caller.
    pub async fn regenerate_one(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Match>, MatchingError> {
        let snapshot = self.load_snapshot().await?;
        self.regenerate_from_snapshot(&snapshot, user_id, limit).await
    }

    /// Regenerate matches for every participant in the snapshot.
    ///
    /// One logical unit of work over the frozen snapshot; per-participant
    /// ranking-or-persistence failures are logged and skipped. At-most-once:
    /// there is no retry and no cancellation surface.
    pub async fn run_campaign(&self, snapshot: Snapshot, limit: usize) -> CampaignReport {
        let participants = snapshot.participant_count();
        let mut succeeded = 0;
        let mut failed = 0;

        tracing::info!(
            "Starting campaign run: {} participants, limit {}",
            participants,
            limit
        );

        for profile in &snapshot.profiles {
            match self
                .regenerate_from_snapshot(&snapshot, &profile.user_id, limit)
                .await
            {
                Ok(matches) => {
                    tracing::debug!(
                        "Regenerated {} matches for {}",
                        matches.len(),
                        profile.user_id
                    );
                    succeeded += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        "Skipping participant {} in campaign run: {}",
                        profile.user_id,
                        e
                    );
                    failed += 1;
                }
            }
        }

        tracing::info!(
            "Campaign run finished: {} succeeded, {} failed of {}",
            succeeded,
            failed,
            participants
        );

        CampaignReport {
            participants,
            succeeded,
            failed,
        }
    }
}
