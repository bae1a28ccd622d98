use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to regenerate one participant's matches
///
/// `limit` is optional; when omitted, the server applies its configured
/// default.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to regenerate matches for the whole campaign
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RunCampaignRequest {
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Query parameters for listing a user's stored matches
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListMatchesQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}
