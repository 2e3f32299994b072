//! News Cache
//!
//! Time-bounded store of fetched articles keyed by asset name. Expiry is
//! lazy: a stale entry reads as absent and is dropped on the next write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};

use super::NewsSource;
use crate::error::Result;
use crate::model::NewsArticle;

/// Source of "now" for expiry checks
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl ManualClock {
    pub const fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    articles: Vec<NewsArticle>,
    inserted_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.inserted_at < ttl
    }
}

/// Shared news cache, created once per process and handed to the engine
pub struct NewsCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl Default for NewsCache {
    fn default() -> Self {
        Self::new(Duration::hours(24))
    }
}

impl NewsCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Cached articles, or `None` when absent or expired
    pub fn get(&self, asset_name: &str) -> Option<Vec<NewsArticle>> {
        let now = self.clock.now();
        self.read()
            .get(asset_name)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.articles.clone())
    }

    /// Insert or replace the articles for an asset
    pub fn put(&self, asset_name: impl Into<String>, articles: Vec<NewsArticle>) {
        let now = self.clock.now();
        let ttl = self.ttl;

        let mut entries = self.write();
        entries.retain(|_, entry| entry.is_fresh(now, ttl));
        entries.insert(
            asset_name.into(),
            CacheEntry {
                articles,
                inserted_at: now,
            },
        );
    }

    /// Read-through lookup.
    ///
    /// On a miss the source is queried and a successful result stored. A
    /// failed fetch is returned as an error and leaves the cache untouched,
    /// so the next call retries.
    pub async fn get_or_fetch(
        &self,
        asset_name: &str,
        source: &dyn NewsSource,
    ) -> Result<Vec<NewsArticle>> {
        if let Some(articles) = self.get(asset_name) {
            tracing::debug!(asset = asset_name, "News cache hit");
            return Ok(articles);
        }

        tracing::debug!(asset = asset_name, source = source.name(), "News cache miss");
        let articles = source.fetch_news_articles(asset_name).await?;
        self.put(asset_name, articles.clone());

        Ok(articles)
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;

        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now, ttl));
        before - entries.len()
    }

    /// Physically stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
