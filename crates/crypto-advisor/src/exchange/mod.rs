//! Market Data Sources
//!
//! Abstractions and implementations for market snapshot providers.

mod coingecko;
mod mock;

pub use coingecko::CoinGeckoClient;
pub use mock::MockMarketData;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::Asset;

/// Market data provider trait (Strategy pattern)
///
/// Implement this for each provider: CoinGecko, CoinMarketCap, etc.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch one page of assets ordered by market cap descending.
    ///
    /// Any transport or provider failure is an error; callers do not retry.
    async fn fetch_market_snapshot(&self, per_page: u32, page: u32) -> Result<Vec<Asset>>;

    /// Provider name
    fn name(&self) -> &str;
}
