// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CrushDeclaration, Match, MatchCandidate, ScoringWeights, SurveyProfile};
pub use requests::{GenerateMatchesRequest, ListMatchesQuery, RunCampaignRequest};
pub use responses::{ErrorResponse, GenerateMatchesResponse, HealthResponse, RunCampaignResponse};
