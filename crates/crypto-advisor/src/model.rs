//! Domain Models
//!
//! Core data types for risk-tiered recommendations.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!
//! Decimals serialize as JSON numbers so responses match the provider's shape.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// A cryptocurrency asset as reported by the market data source
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Provider identifier (e.g., "bitcoin")
    pub id: String,

    /// Ticker symbol (e.g., "btc")
    pub symbol: String,

    /// Display name, unique within one snapshot
    pub name: String,

    /// Logo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Current price in USD
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,

    /// Market capitalization in USD
    #[serde(with = "rust_decimal::serde::float")]
    pub market_cap: Decimal,

    /// Rank by market cap at fetch time (1 = largest)
    pub market_cap_rank: Option<u32>,

    /// 24-hour price change percentage
    #[serde(with = "rust_decimal::serde::float")]
    pub price_change_percentage_24h: Decimal,
}

impl Asset {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.to_lowercase().replace(' ', "-"),
            symbol: String::new(),
            name,
            image: None,
            current_price: Decimal::ZERO,
            market_cap: Decimal::ZERO,
            market_cap_rank: None,
            price_change_percentage_24h: Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    #[must_use]
    pub fn with_rank(mut self, rank: u32) -> Self {
        self.market_cap_rank = Some(rank);
        self
    }

    #[must_use]
    pub fn with_market_cap(mut self, market_cap: Decimal) -> Self {
        self.market_cap = market_cap;
        self
    }

    #[must_use]
    pub fn with_change_24h(mut self, change: Decimal) -> Self {
        self.price_change_percentage_24h = change;
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.current_price = price;
        self
    }
}

/// A news item associated with an asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,

    /// Publication time, informational only
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Publisher name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl NewsArticle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            published_at: None,
            url: None,
            source: None,
        }
    }
}

/// Validated risk tolerance (1 = very conservative, 5 = aggressive)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RiskLevel(u8);

impl RiskLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Levels 4 and 5 reward momentum instead of penalizing movement
    pub const fn rewards_momentum(self) -> bool {
        self.0 >= 4
    }
}

impl TryFrom<i64> for RiskLevel {
    type Error = AdvisorError;

    fn try_from(value: i64) -> Result<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or_else(|| AdvisorError::InvalidRiskLevel(value.to_string()))
    }
}

impl FromStr for RiskLevel {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| AdvisorError::InvalidRiskLevel(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Momentum-ranked asset (plain rank + momentum mode)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredAsset {
    #[serde(flatten)]
    pub asset: Asset,

    #[serde(with = "rust_decimal::serde::float")]
    pub score: Decimal,
}

/// Asset enriched with news sentiment (sentiment-filtered mode)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnrichedAsset {
    #[serde(flatten)]
    pub asset: Asset,

    /// Average headline sentiment, 0 when there is no news
    pub sentiment_score: f64,

    /// Up to three representative articles
    pub articles: Vec<NewsArticle>,
}

/// One entry of a recommendation list
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Recommendation {
    Scored(ScoredAsset),
    Enriched(EnrichedAsset),
}

impl Recommendation {
    pub const fn asset(&self) -> &Asset {
        match self {
            Self::Scored(s) => &s.asset,
            Self::Enriched(e) => &e.asset,
        }
    }
}

/// Response body for a recommendation request
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Recommendations {
    pub recommendations: Vec<Recommendation>,
}

impl Recommendations {
    pub fn names(&self) -> Vec<&str> {
        self.recommendations
            .iter()
            .map(|r| r.asset().name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}
