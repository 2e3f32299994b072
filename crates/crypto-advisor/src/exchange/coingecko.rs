//! CoinGecko Market Data Client
//!
//! Reads `/coins/markets` and normalizes rows into [`Asset`]s.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::MarketDataSource;
use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, Result};
use crate::model::Asset;

/// HTTP client for the CoinGecko public API
pub struct CoinGeckoClient {
    http: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(base_url: impl Into<String>, timeout: std::time::Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("crypto-advisor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AdvisorConfig) -> Result<Self> {
        Self::new(&config.coingecko_base_url, config.http_timeout)
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn fetch_market_snapshot(&self, per_page: u32, page: u32) -> Result<Vec<Asset>> {
        let url = format!("{}/coins/markets", self.base_url);
        let per_page = per_page.to_string();
        let page_param = page.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("vs_currency", "usd"),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", page_param.as_str()),
                ("sparkline", "false"),
            ])
            .send()
            .await
            .map_err(|e| AdvisorError::Upstream(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Upstream(format!(
                "CoinGecko returned HTTP {status}"
            )));
        }

        let rows: Vec<MarketRow> = response
            .json()
            .await
            .map_err(|e| AdvisorError::Upstream(format!("malformed CoinGecko payload: {e}")))?;

        let assets: Vec<Asset> = rows.into_iter().filter_map(MarketRow::into_asset).collect();
        tracing::debug!(count = assets.len(), page, "Fetched CoinGecko market snapshot");

        Ok(assets)
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}

/// Raw `/coins/markets` row. Numeric fields are nullable upstream.
#[derive(Debug, Deserialize)]
struct MarketRow {
    id: String,
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    current_price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    market_cap: Option<Decimal>,
    #[serde(default)]
    market_cap_rank: Option<u32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    price_change_percentage_24h: Option<Decimal>,
}

impl MarketRow {
    /// Nulls become zero; rows without a name are dropped
    fn into_asset(self) -> Option<Asset> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;

        Some(Asset {
            id: self.id,
            symbol: self.symbol,
            name,
            image: self.image,
            current_price: self.current_price.unwrap_or_default(),
            market_cap: self.market_cap.unwrap_or_default(),
            market_cap_rank: self.market_cap_rank.filter(|r| *r > 0),
            price_change_percentage_24h: self.price_change_percentage_24h.unwrap_or_default(),
        })
    }
}
