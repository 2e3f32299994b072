//! Advisor Configuration
//!
//! Provider endpoints, cache retention and fan-out limits, read from the
//! environment once at startup.

use std::time::Duration;

pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2";

/// Result sizes for both recommendation modes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Snapshot size for momentum-rank mode
    pub momentum_snapshot_size: u32,

    /// Number of assets returned by momentum-rank mode
    pub momentum_top_n: usize,

    /// Snapshot size for sentiment-filtered mode
    pub sentiment_snapshot_size: u32,

    /// Number of assets returned by sentiment-filtered mode
    pub sentiment_top_n: usize,

    /// Articles attached to each enriched asset
    pub articles_per_asset: usize,

    /// Maximum concurrent outbound news fetches
    pub max_concurrent_fetches: usize,

    /// Per-fetch timeout for news requests
    pub fetch_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            momentum_snapshot_size: 100,
            momentum_top_n: 5,
            sentiment_snapshot_size: 50,
            sentiment_top_n: 10,
            articles_per_asset: 3,
            max_concurrent_fetches: 5,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Top-level configuration for the advisor
#[derive(Clone, Debug)]
pub struct AdvisorConfig {
    /// CoinGecko API base URL
    pub coingecko_base_url: String,

    /// NewsAPI base URL
    pub news_api_base_url: String,

    /// NewsAPI key; without it every asset gets neutral sentiment
    pub news_api_key: Option<String>,

    /// Articles requested per asset
    pub news_page_size: u32,

    /// How long fetched news stays fresh
    pub news_cache_ttl: chrono::Duration,

    /// HTTP request timeout for provider clients
    pub http_timeout: Duration,

    /// Serve static mock data instead of calling providers
    pub use_mock_data: bool,

    pub engine: EngineConfig,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            coingecko_base_url: DEFAULT_COINGECKO_URL.into(),
            news_api_base_url: DEFAULT_NEWS_API_URL.into(),
            news_api_key: None,
            news_page_size: 10,
            news_cache_ttl: chrono::Duration::hours(24),
            http_timeout: Duration::from_secs(10),
            use_mock_data: false,
            engine: EngineConfig::default(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable, zero or negative
    /// numbers fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let positive = |key: &str| -> Option<u64> {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .filter(|n| *n > 0)
        };

        let http_timeout = positive("HTTP_TIMEOUT_SECS")
            .map_or(defaults.http_timeout, Duration::from_secs);

        let engine = EngineConfig {
            max_concurrent_fetches: positive("NEWS_FETCH_CONCURRENCY")
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(defaults.engine.max_concurrent_fetches),
            fetch_timeout: http_timeout,
            ..defaults.engine
        };

        let news_cache_ttl = positive("NEWS_CACHE_TTL_HOURS")
            .and_then(|h| i64::try_from(h).ok())
            .and_then(chrono::Duration::try_hours)
            .unwrap_or(defaults.news_cache_ttl);

        Self {
            coingecko_base_url: lookup("COINGECKO_BASE_URL")
                .unwrap_or(defaults.coingecko_base_url),
            news_api_base_url: lookup("NEWS_API_BASE_URL").unwrap_or(defaults.news_api_base_url),
            news_api_key: lookup("NEWS_API_KEY").filter(|k| !k.trim().is_empty()),
            news_page_size: positive("NEWS_PAGE_SIZE")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(defaults.news_page_size),
            news_cache_ttl,
            http_timeout,
            use_mock_data: lookup("ADVISOR_MOCK_DATA")
                .is_some_and(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes")),
            engine,
        }
    }
}
