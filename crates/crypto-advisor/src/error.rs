//! Error Types for Crypto Advisor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Message returned to callers for any rejected risk level.
pub const INVALID_RISK_LEVEL_MESSAGE: &str =
    "Invalid risk level. Please provide a value between 1 and 5.";

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Risk level missing, non-numeric, or outside 1-5
    #[error("Invalid risk level: {0}")]
    InvalidRiskLevel(String),

    /// Market data provider failed (network, non-2xx, bad payload)
    #[error("Market data unavailable: {0}")]
    Upstream(String),

    /// News provider failed for a single asset
    #[error("News unavailable: {0}")]
    NewsUnavailable(String),

    /// A risk level reached a tier policy outside its domain
    #[error("No risk policy defined for level {0}")]
    PolicyConfiguration(u8),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl AdvisorError {
    /// Whether the caller sent bad input (as opposed to a service failure)
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidRiskLevel(_))
    }

    /// Convert to a message safe to show end users
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidRiskLevel(_) => INVALID_RISK_LEVEL_MESSAGE,
            _ => "Internal Server Error",
        }
    }
}
