//! # crypto-advisor
//!
//! Risk-tiered cryptocurrency recommendations from a single 1-5 risk level.
//!
//! ## Strategies
//!
//! - **Momentum-Rank** - classify the top 100 by market-cap-rank band, score
//!   by market cap plus 24h momentum, return the best 5
//! - **Sentiment-Filtered** - enrich the top 50 with cached news sentiment,
//!   keep assets under the level's rank ceiling and above its sentiment floor,
//!   return the first 10
//!
//! ## Risk Tiers
//!
//! ```text
//! ┌───────┬──────────────────────┬──────────────────────────────────┐
//! │ Level │ Momentum-Rank band   │ Sentiment-Filtered               │
//! ├───────┼──────────────────────┼──────────────────────────────────┤
//! │   1   │ rank ≤ 10            │ rank ≤ 10,  sentiment ≥  0.5     │
//! │   2   │ 10 < rank ≤ 30       │ rank ≤ 20,  sentiment ≥  0.3     │
//! │   3   │ 30 < rank ≤ 70       │ rank ≤ 100, sentiment ≥  0.0     │
//! │   4   │ 70 < rank ≤ 150      │ any rank,   sentiment ≥ -0.2     │
//! │   5   │ rank > 150           │ any rank,   sentiment ≥ -0.5     │
//! └───────┴──────────────────────┴──────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crypto_advisor::{RecommendationEngine, Strategy, NewsCache, SentimentScorer};
//! use crypto_advisor::exchange::MockMarketData;
//! use crypto_advisor::news::MockNewsSource;
//!
//! let engine = RecommendationEngine::new(
//!     Arc::new(MockMarketData::new()),
//!     Arc::new(MockNewsSource::demo()),
//!     Arc::new(NewsCache::default()),
//!     Arc::new(SentimentScorer::new()),
//!     Default::default(),
//! );
//!
//! let picks = engine.recommend_raw(Strategy::MomentumRank, Some("3")).await?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod exchange;
pub mod model;
pub mod news;
pub mod sentiment;
pub mod strategy;

pub use config::{AdvisorConfig, EngineConfig};
pub use engine::RecommendationEngine;
pub use error::{AdvisorError, Result};
pub use model::{
    Asset, EnrichedAsset, NewsArticle, Recommendation, Recommendations, RiskLevel, ScoredAsset,
};
pub use news::NewsCache;
pub use sentiment::{SentimentResult, SentimentScorer};
pub use strategy::Strategy;
