//! Mock News Source
//!
//! In-memory headlines keyed by asset name. Counts fetches so cache and
//! fan-out behaviour can be asserted.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::NewsSource;
use crate::error::{AdvisorError, Result};
use crate::model::NewsArticle;

/// Mock news source with canned headlines
#[derive(Default)]
pub struct MockNewsSource {
    headlines: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    unconfigured: bool,
    calls: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockNewsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demo headlines for the default mock market snapshot
    pub fn demo() -> Self {
        Self::new()
            .with_headlines("Bitcoin", ["Bitcoin surges to record high as institutional adoption grows"])
            .with_headlines("Ethereum", ["Ethereum upgrade brings great gains for stakers"])
            .with_headlines("Solana", ["Solana network outage sparks panic among traders"])
            .with_headlines("Cardano", ["Cardano rallies on strong partnership news"])
            .with_headlines("Chainlink", ["Chainlink partnership with major banks is a breakthrough"])
            .with_headlines("Polkadot", ["Polkadot developers face lawsuit over token sale"])
            .with_headlines("Injective", ["Injective hacked, funds stolen in devastating exploit"])
            .with_headlines("Axie Infinity", ["Axie Infinity players love the new season"])
            .with_headlines("Pepe Two", ["Pepe Two is a scam, warn analysts"])
    }

    #[must_use]
    pub fn with_headlines<I, S>(mut self, asset_name: &str, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headlines
            .insert(asset_name.to_string(), titles.into_iter().map(Into::into).collect());
        self
    }

    /// Every fetch for this asset fails
    #[must_use]
    pub fn failing_for(mut self, asset_name: &str) -> Self {
        self.failing.insert(asset_name.to_string());
        self
    }

    /// Sleep before answering each fetch
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Report the source as unconfigured, like a NewsAPI client with no key
    #[must_use]
    pub fn unconfigured(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    /// Fetches made for one asset
    pub fn calls_for(&self, asset_name: &str) -> usize {
        self.lock_calls().get(asset_name).copied().unwrap_or(0)
    }

    /// Fetches made across all assets
    pub fn total_calls(&self) -> usize {
        self.lock_calls().values().sum()
    }

    /// Highest number of fetches observed running at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, HashMap<String, usize>> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl NewsSource for MockNewsSource {
    async fn fetch_news_articles(&self, asset_name: &str) -> Result<Vec<NewsArticle>> {
        *self.lock_calls().entry(asset_name.to_string()).or_default() += 1;

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(asset_name) {
            return Err(AdvisorError::NewsUnavailable(format!(
                "mock news unavailable for {asset_name}"
            )));
        }

        Ok(self
            .headlines
            .get(asset_name)
            .map(|titles| titles.iter().map(NewsArticle::new).collect())
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "MockNews"
    }

    fn is_configured(&self) -> bool {
        !self.unconfigured
    }
}
