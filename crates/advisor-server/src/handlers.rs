//! HTTP Handlers

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crypto_advisor::{AdvisorError, Recommendations, Strategy};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    #[serde(rename = "riskLevel")]
    pub risk_level: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub cached_news_entries: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error returned from any handler
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: "Method not allowed".into(),
        }
    }
}

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        // causes are logged where they happen, in the engine
        let status = if err.is_invalid_input() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        Self {
            status,
            message: err.user_message().into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        cached_news_entries: state.engine.cache().len(),
    })
}

/// Rank-band + momentum recommendations (top 5)
pub async fn recommendations(
    State(state): State<AppState>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> Result<Json<Recommendations>, ApiError> {
    recommend(&state, Strategy::MomentumRank, query).await
}

/// News-sentiment filtered recommendations (top 10)
pub async fn crypto_recommendations(
    State(state): State<AppState>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> Result<Json<Recommendations>, ApiError> {
    recommend(&state, Strategy::SentimentFiltered, query).await
}

/// Fallback for non-GET requests on recommendation routes
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

async fn recommend(
    state: &AppState,
    strategy: Strategy,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> Result<Json<Recommendations>, ApiError> {
    let risk_level = query
        .map_err(|e| AdvisorError::InvalidRiskLevel(e.body_text()))?
        .0
        .risk_level;

    let result = state
        .engine
        .recommend_raw(strategy, risk_level.as_deref())
        .await?;

    Ok(Json(result))
}
