use crate::core::{MatchRunner, MatchingError, Snapshot};
use crate::models::{
    ErrorResponse, GenerateMatchesRequest, GenerateMatchesResponse, HealthResponse,
    ListMatchesQuery, RunCampaignRequest, RunCampaignResponse,
};
use crate::services::{CacheKey, CacheManager, PostgresClient};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Runner wired to the PostgreSQL-backed collaborators
pub type AppRunner = MatchRunner<PostgresClient, PostgresClient>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    /// None when Redis is unavailable; the service degrades to cache-off
    pub cache: Option<Arc<CacheManager>>,
    pub runner: AppRunner,
    pub default_limit: u16,
    pub max_limit: u16,
}

/// Resolve the match-list size for a request: the configured default when
/// the caller omitted it, capped at the configured maximum either way.
fn effective_limit(requested: Option<u16>, default_limit: u16, max_limit: u16) -> usize {
    requested.unwrap_or(default_limit).min(max_limit) as usize
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches", web::get().to(list_matches))
        .route("/matches/generate", web::post().to(generate_matches))
        .route("/admin/matching/run", web::post().to(run_campaign));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Read-through snapshot fetch for the interactive path. The configured
/// cache TTL is the staleness bound; campaign runs never come through here.
async fn snapshot_for_request(state: &AppState) -> Result<Snapshot, MatchingError> {
    if let Some(cache) = &state.cache {
        if let Ok(snapshot) = cache.get::<Snapshot>(&CacheKey::snapshot()).await {
            return Ok(snapshot);
        }
    }

    let snapshot = state.runner.load_snapshot().await?;

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set(&CacheKey::snapshot(), &snapshot).await {
            tracing::warn!("Failed to cache survey snapshot: {}", e);
        }
    }

    Ok(snapshot)
}

/// Regenerate one participant's matches
///
/// POST /api/v1/matches/generate
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 7
/// }
/// ```
///
/// Synchronous: the new ranked set is persisted and returned in the response.
async fn generate_matches(
    state: web::Data<AppState>,
    req: web::Json<GenerateMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for generate_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &req.user_id;
    let limit = effective_limit(req.limit, state.default_limit, state.max_limit);

    tracing::info!("Regenerating matches for user: {}, limit: {}", user_id, limit);

    let snapshot = match snapshot_for_request(&state).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to load survey snapshot: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load survey snapshot".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    match state
        .runner
        .regenerate_from_snapshot(&snapshot, user_id, limit)
        .await
    {
        Ok(matches) => {
            // The stored list changed; drop the cached copy
            if let Some(cache) = &state.cache {
                if let Err(e) = cache.delete(&CacheKey::matches(user_id)).await {
                    tracing::warn!("Failed to invalidate match cache for {}: {}", user_id, e);
                }
            }

            tracing::info!("Generated {} matches for user {}", matches.len(), user_id);

            HttpResponse::Ok().json(GenerateMatchesResponse {
                count: matches.len(),
                matches,
            })
        }
        Err(MatchingError::SurveyNotCompleted) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Survey not completed".to_string(),
            message: "Please complete the survey first".to_string(),
            status_code: 400,
        }),
        Err(e) => {
            tracing::error!("Failed to regenerate matches for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to generate matches".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// List a user's stored matches, in rank order
///
/// GET /api/v1/matches?userId={userId}
async fn list_matches(
    state: web::Data<AppState>,
    query: web::Query<ListMatchesQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &query.user_id;

    if let Some(cache) = &state.cache {
        if let Ok(matches) = cache
            .get::<Vec<crate::models::Match>>(&CacheKey::matches(user_id))
            .await
        {
            return HttpResponse::Ok().json(GenerateMatchesResponse {
                count: matches.len(),
                matches,
            });
        }
    }

    match state.postgres.get_matches(user_id).await {
        Ok(matches) => {
            if let Some(cache) = &state.cache {
                if let Err(e) = cache.set(&CacheKey::matches(user_id), &matches).await {
                    tracing::warn!("Failed to cache matches for {}: {}", user_id, e);
                }
            }

            HttpResponse::Ok().json(GenerateMatchesResponse {
                count: matches.len(),
                matches,
            })
        }
        Err(e) => {
            tracing::error!("Failed to fetch matches for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch matches".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Trigger a full-campaign regeneration
///
/// POST /api/v1/admin/matching/run
///
/// Takes a fresh snapshot of the completed-survey pool, then runs the batch
/// in the background. Responds 202 immediately; per-participant failures are
/// logged and skipped, invisible to this caller.
async fn run_campaign(
    state: web::Data<AppState>,
    req: web::Json<RunCampaignRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = effective_limit(req.limit, state.default_limit, state.max_limit);

    // Always a fresh snapshot for a batch run, never the cached one
    let snapshot = match state.runner.load_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to load survey snapshot for campaign run: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load survey snapshot".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let total_participants = snapshot.participant_count();
    if total_participants == 0 {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "No participants".to_string(),
            message: "No completed surveys found to match".to_string(),
            status_code: 400,
        });
    }

    let runner = state.runner.clone();
    tokio::spawn(async move {
        runner.run_campaign(snapshot, limit).await;
    });

    HttpResponse::Accepted().json(RunCampaignResponse {
        message: "Matching algorithm started in background".to_string(),
        total_participants,
        status: "processing".to_string(),
    })
}
