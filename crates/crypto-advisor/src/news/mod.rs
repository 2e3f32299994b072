//! News Sources
//!
//! Per-asset headline providers plus the time-bounded cache that sits in
//! front of them.

pub mod cache;
mod mock;
mod newsapi;

pub use cache::{Clock, ManualClock, NewsCache, SystemClock};
pub use mock::MockNewsSource;
pub use newsapi::NewsApiClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::NewsArticle;

/// News provider trait
///
/// A failure here is never fatal to a recommendation request: the engine
/// degrades the asset to neutral sentiment and carries on.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Recent articles mentioning the asset, newest first
    async fn fetch_news_articles(&self, asset_name: &str) -> Result<Vec<NewsArticle>>;

    /// Provider name
    fn name(&self) -> &str;

    /// False when the source can never answer (e.g. no API key), so callers
    /// can skip it instead of failing once per asset
    fn is_configured(&self) -> bool {
        true
    }
}
