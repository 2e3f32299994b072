//! Recommendation Engine
//!
//! Composition root for both strategies:
//!
//! ```text
//! market snapshot ──▶ [news cache ─▶ sentiment]? ──▶ risk policy ──▶ top N
//! ```
//!
//! The market snapshot is fail-hard: any error aborts the request as
//! [`AdvisorError::Upstream`]. News is fail-soft: a failed or timed-out fetch
//! leaves that one asset with neutral sentiment.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::config::EngineConfig;
use crate::error::{AdvisorError, Result};
use crate::exchange::MarketDataSource;
use crate::model::{
    Asset, EnrichedAsset, NewsArticle, Recommendation, Recommendations, RiskLevel, ScoredAsset,
};
use crate::news::{NewsCache, NewsSource};
use crate::sentiment::SentimentScorer;
use crate::strategy::{RankBand, SentimentFilter, Strategy, rank_by_momentum};

pub struct RecommendationEngine {
    market: Arc<dyn MarketDataSource>,
    news: Arc<dyn NewsSource>,
    cache: Arc<NewsCache>,
    scorer: Arc<SentimentScorer>,
    fetch_limiter: Semaphore,
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(
        market: Arc<dyn MarketDataSource>,
        news: Arc<dyn NewsSource>,
        cache: Arc<NewsCache>,
        scorer: Arc<SentimentScorer>,
        config: EngineConfig,
    ) -> Self {
        Self {
            market,
            news,
            cache,
            scorer,
            fetch_limiter: Semaphore::new(config.max_concurrent_fetches.max(1)),
            config,
        }
    }

    pub fn cache(&self) -> &NewsCache {
        &self.cache
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate an unparsed risk level, then run the strategy.
    ///
    /// Invalid input is rejected before any provider is contacted.
    pub async fn recommend_raw(
        &self,
        strategy: Strategy,
        risk_level: Option<&str>,
    ) -> Result<Recommendations> {
        let level = risk_level
            .ok_or_else(|| AdvisorError::InvalidRiskLevel("missing".into()))?
            .parse::<RiskLevel>()?;

        self.recommend(strategy, level).await
    }

    pub async fn recommend(&self, strategy: Strategy, level: RiskLevel) -> Result<Recommendations> {
        let recommendations: Vec<Recommendation> = match strategy {
            Strategy::MomentumRank => self
                .momentum_rank(level)
                .await?
                .into_iter()
                .map(Recommendation::Scored)
                .collect(),
            Strategy::SentimentFiltered => self
                .sentiment_filtered(level)
                .await?
                .into_iter()
                .map(Recommendation::Enriched)
                .collect(),
        };

        tracing::info!(
            %strategy,
            %level,
            count = recommendations.len(),
            "Recommendations ready"
        );

        Ok(Recommendations { recommendations })
    }

    /// Rank-band tiering, scored by market cap and momentum, top N by score
    pub async fn momentum_rank(&self, level: RiskLevel) -> Result<Vec<ScoredAsset>> {
        let band = RankBand::for_level(level.get())?;

        let snapshot = self.snapshot(self.config.momentum_snapshot_size).await?;
        let fetched = snapshot.len();

        let in_band: Vec<Asset> = snapshot.into_iter().filter(|a| band.admits(a)).collect();
        tracing::debug!(fetched, matched = in_band.len(), ?band, "Classified by rank band");

        let mut ranked = rank_by_momentum(in_band, level);
        ranked.truncate(self.config.momentum_top_n);

        Ok(ranked)
    }

    /// Rank ceiling plus sentiment floor, top N in snapshot order
    pub async fn sentiment_filtered(&self, level: RiskLevel) -> Result<Vec<EnrichedAsset>> {
        let filter = SentimentFilter::for_level(level.get())?;

        let snapshot = self.snapshot(self.config.sentiment_snapshot_size).await?;
        let enriched = self.enrich(snapshot).await;
        let enriched_count = enriched.len();

        let passing: Vec<EnrichedAsset> = enriched
            .into_iter()
            .filter(|e| filter.admits(&e.asset, e.sentiment_score))
            .take(self.config.sentiment_top_n)
            .collect();

        tracing::debug!(
            enriched = enriched_count,
            passing = passing.len(),
            ?filter,
            "Applied sentiment filter"
        );

        Ok(passing)
    }

    async fn snapshot(&self, size: u32) -> Result<Vec<Asset>> {
        self.market
            .fetch_market_snapshot(size, 1)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    source = self.market.name(),
                    "Market data fetch failed"
                );
                match e {
                    AdvisorError::Upstream(_) => e,
                    other => AdvisorError::Upstream(other.to_string()),
                }
            })
    }

    /// Attach sentiment and articles to every asset.
    ///
    /// Fetches fan out concurrently, bounded by the engine's semaphore; the
    /// result is only returned once every asset is done, in input order.
    async fn enrich(&self, assets: Vec<Asset>) -> Vec<EnrichedAsset> {
        if !self.news.is_configured() {
            tracing::debug!(
                source = self.news.name(),
                "News source not configured, using neutral sentiment"
            );
            return assets
                .into_iter()
                .map(|asset| EnrichedAsset {
                    asset,
                    sentiment_score: 0.0,
                    articles: Vec::new(),
                })
                .collect();
        }

        join_all(assets.into_iter().map(|asset| self.enrich_one(asset))).await
    }

    async fn enrich_one(&self, asset: Asset) -> EnrichedAsset {
        let articles = self.articles_for(&asset.name).await;
        let sentiment = self.scorer.score_articles(&articles);

        EnrichedAsset {
            asset,
            sentiment_score: sentiment.average_score,
            articles: articles
                .into_iter()
                .take(self.config.articles_per_asset)
                .collect(),
        }
    }

    /// Cached or freshly fetched articles; empty on any failure
    async fn articles_for(&self, asset_name: &str) -> Vec<NewsArticle> {
        if let Some(articles) = self.cache.get(asset_name) {
            return articles;
        }

        let Ok(_permit) = self.fetch_limiter.acquire().await else {
            tracing::warn!(asset = asset_name, "News fetch limiter closed");
            return Vec::new();
        };

        let fetch = self.cache.get_or_fetch(asset_name, self.news.as_ref());
        match tokio::time::timeout(self.config.fetch_timeout, fetch).await {
            Ok(Ok(articles)) => articles,
            Ok(Err(e)) => {
                tracing::warn!(
                    asset = asset_name,
                    error = %e,
                    "News fetch failed, using neutral sentiment"
                );
                Vec::new()
            }
            Err(_) => {
                tracing::warn!(
                    asset = asset_name,
                    timeout = ?self.config.fetch_timeout,
                    "News fetch timed out, using neutral sentiment"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::exchange::MockMarketData;
    use crate::news::MockNewsSource;

    struct Harness {
        engine: RecommendationEngine,
        market: Arc<MockMarketData>,
        news: Arc<MockNewsSource>,
    }

    fn harness(assets: Vec<Asset>, news: MockNewsSource) -> Harness {
        harness_with_config(assets, news, EngineConfig::default())
    }

    fn harness_with_config(
        assets: Vec<Asset>,
        news: MockNewsSource,
        config: EngineConfig,
    ) -> Harness {
        let market = Arc::new(MockMarketData::with_assets(assets));
        let news = Arc::new(news);
        let engine = RecommendationEngine::new(
            market.clone(),
            news.clone(),
            Arc::new(NewsCache::default()),
            Arc::new(SentimentScorer::new()),
            config,
        );
        Harness {
            engine,
            market,
            news,
        }
    }

    fn level(l: i64) -> RiskLevel {
        RiskLevel::try_from(l).unwrap()
    }

    fn ranked(name: &str, rank: u32) -> Asset {
        Asset::new(name).with_rank(rank)
    }

    #[tokio::test]
    async fn test_invalid_levels_rejected_before_fetch() {
        let h = harness(Vec::new(), MockNewsSource::new());

        for strategy in [Strategy::MomentumRank, Strategy::SentimentFiltered] {
            for raw in [None, Some(""), Some("abc"), Some("0"), Some("6"), Some("-2")] {
                let err = h.engine.recommend_raw(strategy, raw).await.unwrap_err();
                assert!(err.is_invalid_input(), "{raw:?} accepted by {strategy}");
            }
        }

        assert_eq!(h.market.calls(), 0);
        assert_eq!(h.news.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_momentum_example() {
        let h = harness(
            vec![
                Asset::new("A")
                    .with_rank(5)
                    .with_market_cap(dec!(20000000000))
                    .with_change_24h(dec!(3)),
                Asset::new("B")
                    .with_rank(50)
                    .with_market_cap(dec!(10000000000))
                    .with_change_24h(dec!(-1)),
            ],
            MockNewsSource::new(),
        );

        let result = h.engine.momentum_rank(level(1)).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].asset.name, "A");
        assert_eq!(result[0].score, dec!(17));
        assert_eq!(h.news.total_calls(), 0, "momentum mode never reads news");
    }

    #[tokio::test]
    async fn test_momentum_truncates_to_five() {
        let assets = (1..=10)
            .map(|r| {
                ranked(&format!("Coin{r}"), r)
                    .with_market_cap(dec!(1000000000) * rust_decimal::Decimal::from(r))
            })
            .collect();
        let h = harness(assets, MockNewsSource::new());

        let result = h.engine.momentum_rank(level(1)).await.unwrap();
        let names: Vec<&str> = result.iter().map(|s| s.asset.name.as_str()).collect();
        assert_eq!(names, ["Coin10", "Coin9", "Coin8", "Coin7", "Coin6"]);
    }

    #[tokio::test]
    async fn test_momentum_empty_band_is_ok() {
        let h = harness(
            vec![ranked("Top", 1), Asset::new("Unranked")],
            MockNewsSource::new(),
        );

        let result = h.engine.recommend(Strategy::MomentumRank, level(5)).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces() {
        let engine = RecommendationEngine::new(
            Arc::new(MockMarketData::failing()),
            Arc::new(MockNewsSource::new()),
            Arc::new(NewsCache::default()),
            Arc::new(SentimentScorer::new()),
            EngineConfig::default(),
        );

        for strategy in [Strategy::MomentumRank, Strategy::SentimentFiltered] {
            let err = engine.recommend(strategy, level(3)).await.unwrap_err();
            assert!(matches!(err, AdvisorError::Upstream(_)));
            assert_eq!(err.user_message(), "Internal Server Error");
        }
    }

    #[tokio::test]
    async fn test_sentiment_example() {
        let h = harness(
            vec![ranked("Upbeat", 50), ranked("Gloomy", 50)],
            MockNewsSource::new()
                .with_headlines("Upbeat", ["Upbeat rallies after partnership breakthrough"])
                .with_headlines("Gloomy", ["Gloomy exchange hacked, funds stolen"]),
        );

        let result = h.engine.sentiment_filtered(level(3)).await.unwrap();
        let names: Vec<&str> = result.iter().map(|e| e.asset.name.as_str()).collect();
        assert_eq!(names, ["Upbeat"]);
        assert!(result[0].sentiment_score > 0.0);
        assert_eq!(result[0].articles.len(), 1);
    }

    #[tokio::test]
    async fn test_sentiment_conservative_requires_rank_and_mood() {
        let bullish = ["Bullish breakout as adoption surges to record high"];
        let h = harness(
            vec![ranked("TopHappy", 3), ranked("TopQuiet", 4), ranked("MidHappy", 15)],
            MockNewsSource::new()
                .with_headlines("TopHappy", bullish)
                .with_headlines("MidHappy", bullish),
        );

        let result = h.engine.sentiment_filtered(level(1)).await.unwrap();
        let names: Vec<&str> = result.iter().map(|e| e.asset.name.as_str()).collect();
        assert_eq!(names, ["TopHappy"]);
        assert!(result.iter().all(|e| e.sentiment_score >= 0.5));
    }

    #[tokio::test]
    async fn test_sentiment_aggressive_has_no_ceiling() {
        let h = harness(
            vec![ranked("Deep", 900), Asset::new("Unranked"), ranked("Doomed", 2)],
            MockNewsSource::new()
                .with_headlines("Doomed", ["Doomed token is a scam and fraud, crash follows"]),
        );

        let result = h.engine.sentiment_filtered(level(5)).await.unwrap();
        let names: Vec<&str> = result.iter().map(|e| e.asset.name.as_str()).collect();
        assert_eq!(names, ["Deep", "Unranked"]);
    }

    #[tokio::test]
    async fn test_sentiment_preserves_order_and_truncates() {
        let assets: Vec<Asset> = (1..=30).map(|r| ranked(&format!("Coin{r}"), r)).collect();
        let h = harness(assets, MockNewsSource::new());

        let result = h.engine.sentiment_filtered(level(4)).await.unwrap();
        let names: Vec<String> = result.iter().map(|e| e.asset.name.clone()).collect();
        let expected: Vec<String> = (1..=10).map(|r| format!("Coin{r}")).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_articles_capped_at_three() {
        let h = harness(
            vec![ranked("Busy", 5)],
            MockNewsSource::new().with_headlines("Busy", ["one", "two", "three", "four", "five"]),
        );

        let result = h.engine.sentiment_filtered(level(5)).await.unwrap();
        let titles: Vec<&str> = result[0].articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_single_news_failure_degrades_to_neutral() {
        let h = harness(
            vec![ranked("Healthy", 5), ranked("Broken", 6)],
            MockNewsSource::new()
                .with_headlines("Healthy", ["Healthy network upgrade a great success"])
                .failing_for("Broken"),
        );

        let result = h.engine.sentiment_filtered(level(3)).await.unwrap();
        assert_eq!(result.len(), 2);

        let broken = result.iter().find(|e| e.asset.name == "Broken").unwrap();
        assert_eq!(broken.sentiment_score, 0.0);
        assert!(broken.articles.is_empty());

        // failure was not cached, so the next request retries
        assert!(h.engine.cache().get("Broken").is_none());
        h.engine.sentiment_filtered(level(3)).await.unwrap();
        assert_eq!(h.news.calls_for("Broken"), 2);
        assert_eq!(h.news.calls_for("Healthy"), 1);
    }

    #[tokio::test]
    async fn test_news_timeout_degrades_to_neutral() {
        let config = EngineConfig {
            fetch_timeout: Duration::from_millis(20),
            ..EngineConfig::default()
        };
        let h = harness_with_config(
            vec![ranked("Slow", 5)],
            MockNewsSource::new()
                .with_headlines("Slow", ["Slow chain rallies"])
                .with_delay(Duration::from_millis(500)),
            config,
        );

        let result = h.engine.sentiment_filtered(level(4)).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sentiment_score, 0.0);
        assert!(h.engine.cache().get("Slow").is_none());
    }

    #[tokio::test]
    async fn test_news_cached_across_requests() {
        let h = harness(
            vec![ranked("Bitcoin", 1), ranked("Ethereum", 2)],
            MockNewsSource::new().with_headlines("Bitcoin", ["Bitcoin rallies"]),
        );

        for _ in 0..3 {
            h.engine.sentiment_filtered(level(5)).await.unwrap();
        }

        assert_eq!(h.news.calls_for("Bitcoin"), 1);
        assert_eq!(h.news.calls_for("Ethereum"), 1);
        assert_eq!(h.engine.cache().len(), 2);
    }

    #[tokio::test]
    async fn test_fan_out_is_bounded() {
        let config = EngineConfig {
            max_concurrent_fetches: 3,
            ..EngineConfig::default()
        };
        let assets: Vec<Asset> = (1..=12).map(|r| ranked(&format!("Coin{r}"), r)).collect();
        let h = harness_with_config(
            assets,
            MockNewsSource::new().with_delay(Duration::from_millis(10)),
            config,
        );

        let result = h.engine.sentiment_filtered(level(5)).await.unwrap();
        assert_eq!(result.len(), 10);
        assert_eq!(h.news.total_calls(), 12);
        assert!(h.news.peak_in_flight() <= 3);
    }

    #[tokio::test]
    async fn test_unconfigured_news_is_skipped() {
        let h = harness(
            vec![ranked("Bitcoin", 1), Asset::new("Unranked"), ranked("Pepe", 400)],
            MockNewsSource::new()
                .with_headlines("Bitcoin", ["Bitcoin rallies"])
                .unconfigured(),
        );

        let result = h.engine.sentiment_filtered(level(5)).await.unwrap();
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|e| e.sentiment_score == 0.0 && e.articles.is_empty()));

        assert_eq!(h.news.total_calls(), 0);
        assert_eq!(h.news.peak_in_flight(), 0);
        assert!(h.engine.cache().is_empty());
    }

    #[tokio::test]
    async fn test_recommend_wraps_strategy_output() {
        let h = harness(MockMarketData::demo_assets(), MockNewsSource::demo());

        let momentum = h.engine.recommend(Strategy::MomentumRank, level(1)).await.unwrap();
        assert!(momentum.len() <= 5);
        assert_eq!(momentum.names()[0], "Bitcoin");
        assert!(momentum
            .recommendations
            .iter()
            .all(|r| matches!(r, Recommendation::Scored(_))));

        let filtered = h.engine.recommend(Strategy::SentimentFiltered, level(1)).await.unwrap();
        assert!(filtered.len() <= 10);
        assert!(filtered
            .recommendations
            .iter()
            .all(|r| matches!(r, Recommendation::Enriched(_))));

        let json = serde_json::to_value(&momentum).unwrap();
        assert!(json["recommendations"].is_array());
    }
}
