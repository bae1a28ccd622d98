use crate::models::domain::Match;
use serde::{Deserialize, Serialize};

/// Response for the single-participant regeneration endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateMatchesResponse {
    pub matches: Vec<Match>,
    pub count: usize,
}

/// Response for the campaign-wide regeneration trigger.
/// Returned immediately; the actual run continues in the background.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunCampaignResponse {
    pub message: String,
    pub total_participants: usize,
    pub status: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
