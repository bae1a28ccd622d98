use crate::core::{MatchSink, StoreError, SurveySnapshotStore};
use crate::models::{CrushDeclaration, Match, SurveyProfile};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// PostgreSQL client backing both engine collaborators: the survey/crush
/// snapshot store (read) and the match sink (write).
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// All completed survey profiles, joined to the participant's email
    pub async fn get_completed_profiles(&self) -> Result<Vec<SurveyProfile>, PostgresError> {
        let query = r#"
            SELECT s.user_id, u.email, s.personality_type, s.interests,
                   s."values", s.lifestyle, s.is_complete
            FROM surveys s
            JOIN users u ON u.id = s.user_id
            WHERE s.is_complete = true
            ORDER BY s.completed_at DESC
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let profiles = rows
            .iter()
            .map(|row| SurveyProfile {
                user_id: row.get("user_id"),
                email: row.get("email"),
                personality_type: row.get("personality_type"),
                interests: row.get("interests"),
                values: row.get("values"),
                lifestyle: row.get("lifestyle"),
                is_complete: row.get("is_complete"),
            })
            .collect::<Vec<_>>();

        tracing::debug!("Fetched {} completed survey profiles", profiles.len());

        Ok(profiles)
    }

    /// All crush declarations across the campaign, in priority order
    pub async fn get_crush_declarations(&self) -> Result<Vec<CrushDeclaration>, PostgresError> {
        let query = r#"
            SELECT user_id, crush_email, rank
            FROM crushes
            ORDER BY user_id, rank ASC
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let declarations = rows
            .iter()
            .map(|row| CrushDeclaration {
                user_id: row.get("user_id"),
                crush_email: row.get("crush_email"),
                rank: row.get("rank"),
            })
            .collect();

        Ok(declarations)
    }

    /// Atomically replace a user's match set: delete-all then insert-all in
    /// one transaction, so there is no window with a partial list visible.
    pub async fn replace_matches(
        &self,
        user_id: &str,
        matches: &[Match],
    ) -> Result<(), PostgresError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM matches WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for m in matches {
            sqlx::query(
                r#"
                INSERT INTO matches
                    (user_id, matched_user_id, compatibility_score, rank, is_mutual_crush, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(&m.user_id)
            .bind(&m.matched_user_id)
            .bind(m.compatibility_score)
            .bind(m.rank)
            .bind(m.is_mutual_crush)
            .bind(m.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!("Replaced match set for {}: {} rows", user_id, matches.len());

        Ok(())
    }

    /// A user's stored matches, in rank order
    pub async fn get_matches(&self, user_id: &str) -> Result<Vec<Match>, PostgresError> {
        let query = r#"
            SELECT user_id, matched_user_id, compatibility_score, rank,
                   is_mutual_crush, created_at
            FROM matches
            WHERE user_id = $1
            ORDER BY rank ASC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let matches = rows
            .iter()
            .map(|row| Match {
                user_id: row.get("user_id"),
                matched_user_id: row.get("matched_user_id"),
                compatibility_score: row.get("compatibility_score"),
                rank: row.get("rank"),
                is_mutual_crush: row.get("is_mutual_crush"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(matches)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl SurveySnapshotStore for PostgresClient {
    async fn completed_profiles(&self) -> Result<Vec<SurveyProfile>, StoreError> {
        Ok(self.get_completed_profiles().await?)
    }

    async fn crush_declarations(&self) -> Result<Vec<CrushDeclaration>, StoreError> {
        Ok(self.get_crush_declarations().await?)
    }
}

#[async_trait]
impl MatchSink for PostgresClient {
    async fn replace_matches(&self, user_id: &str, matches: &[Match]) -> Result<(), StoreError> {
        Ok(PostgresClient::replace_matches(self, user_id, matches).await?)
    }

    async fn matches_for(&self, user_id: &str) -> Result<Vec<Match>, StoreError> {
        Ok(self.get_matches(user_id).await?)
    }
}
