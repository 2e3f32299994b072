//! Application State

use std::sync::Arc;

use crypto_advisor::RecommendationEngine;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Recommendation engine (owns the process-wide news cache)
    pub engine: Arc<RecommendationEngine>,
}
