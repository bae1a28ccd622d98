//! Crush Algo - compatibility matching service for survey-based crush campaigns
//!
//! This library provides the matching and ranking engine behind the campaign:
//! pairwise compatibility scoring over survey profiles, mutual-crush boosted
//! ranking, and batch regeneration of every participant's match set.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_compatibility, CrushIndex, MatchRunner, MatchingError, Ranker, Snapshot};
pub use models::{CrushDeclaration, Match, MatchCandidate, ScoringWeights, SurveyProfile};
