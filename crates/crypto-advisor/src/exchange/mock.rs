//! Mock Market Data Source
//!
//! For testing and demo purposes. Returns a realistic static snapshot that
//! spans every risk tier, or a caller-supplied asset list.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::MarketDataSource;
use crate::error::{AdvisorError, Result};
use crate::model::Asset;

/// Mock market data source with static prices
pub struct MockMarketData {
    assets: Vec<Asset>,
    fail: bool,
    calls: AtomicUsize,
}

impl Default for MockMarketData {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::with_assets(Self::demo_assets())
    }

    /// Serve exactly these assets, in this order
    pub const fn with_assets(assets: Vec<Asset>) -> Self {
        Self {
            assets,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every fetch fails (for error-path testing)
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_assets(Vec::new())
        }
    }

    /// Number of snapshot fetches served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataSource for MockMarketData {
    async fn fetch_market_snapshot(&self, per_page: u32, page: u32) -> Result<Vec<Asset>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(AdvisorError::Upstream("mock market data unavailable".into()));
        }

        let per_page = per_page as usize;
        let start = (page.max(1) as usize - 1) * per_page;

        Ok(self.assets.iter().skip(start).take(per_page).cloned().collect())
    }

    fn name(&self) -> &str {
        "MockMarketData"
    }
}

impl MockMarketData {
    /// Twenty assets covering every rank band, market cap descending
    pub fn demo_assets() -> Vec<Asset> {
        // (symbol, name, price, market cap, rank, 24h change)
        let rows: [(&str, &str, Decimal, Decimal, u32, Decimal); 20] = [
            ("btc", "Bitcoin", dec!(97500), dec!(1930000000000), 1, dec!(2.5)),
            ("eth", "Ethereum", dec!(3450), dec!(415000000000), 2, dec!(1.8)),
            ("usdt", "Tether", dec!(1.00), dec!(139000000000), 3, dec!(0.01)),
            ("xrp", "XRP", dec!(2.35), dec!(135000000000), 4, dec!(0.9)),
            ("sol", "Solana", dec!(195), dec!(93000000000), 5, dec!(4.2)),
            ("ada", "Cardano", dec!(0.95), dec!(33000000000), 9, dec!(-1.2)),
            ("avax", "Avalanche", dec!(42.00), dec!(17000000000), 12, dec!(5.5)),
            ("link", "Chainlink", dec!(24.50), dec!(15400000000), 14, dec!(3.1)),
            ("dot", "Polkadot", dec!(7.20), dec!(11000000000), 19, dec!(0.8)),
            ("ltc", "Litecoin", dec!(105), dec!(8600000000), 24, dec!(1.5)),
            ("uni", "Uniswap", dec!(14.20), dec!(7200000000), 28, dec!(2.2)),
            ("pol", "Polygon", dec!(0.52), dec!(4100000000), 38, dec!(-0.5)),
            ("atom", "Cosmos", dec!(9.80), dec!(3800000000), 41, dec!(1.2)),
            ("inj", "Injective", dec!(24.10), dec!(2350000000), 58, dec!(-3.4)),
            ("grt", "The Graph", dec!(0.21), dec!(2000000000), 66, dec!(6.1)),
            ("sand", "The Sandbox", dec!(0.58), dec!(1400000000), 92, dec!(-2.7)),
            ("axs", "Axie Infinity", dec!(6.40), dec!(980000000), 118, dec!(8.3)),
            ("zil", "Zilliqa", dec!(0.022), dec!(420000000), 145, dec!(-4.9)),
            ("shib2", "Shiba Two", dec!(0.00004), dec!(150000000), 176, dec!(15.2)),
            ("pepe2", "Pepe Two", dec!(0.00001), dec!(95000000), 231, dec!(-11.6)),
        ];

        rows.into_iter()
            .map(|(symbol, name, price, market_cap, rank, change)| {
                Asset::new(name)
                    .with_symbol(symbol)
                    .with_price(price)
                    .with_market_cap(market_cap)
                    .with_rank(rank)
                    .with_change_24h(change)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_snapshot() {
        let source = MockMarketData::new();

        let assets = source.fetch_market_snapshot(100, 1).await.unwrap();
        assert_eq!(assets.len(), 20);
        assert_eq!(assets[0].name, "Bitcoin");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_paging() {
        let source = MockMarketData::new();

        let page = source.fetch_market_snapshot(5, 2).await.unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].name, "Cardano");

        let beyond = source.fetch_market_snapshot(50, 3).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_failing_source() {
        let source = MockMarketData::failing();
        let result = source.fetch_market_snapshot(10, 1).await;
        assert!(matches!(result, Err(AdvisorError::Upstream(_))));
    }
}
