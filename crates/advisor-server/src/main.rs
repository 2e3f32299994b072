//! crypto-advisor HTTP Server
//!
//! Axum-based server exposing both recommendation strategies as JSON
//! endpoints. Provider clients, the news cache and the sentiment scorer are
//! built once here and shared by every request.

mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crypto_advisor::{
    exchange::{CoinGeckoClient, MarketDataSource, MockMarketData},
    news::{MockNewsSource, NewsApiClient, NewsSource},
    AdvisorConfig, NewsCache, RecommendationEngine, SentimentScorer,
};

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment first so .env can set RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AdvisorConfig::from_env();

    let (market, news) = build_sources(&config)?;
    tracing::info!("Market data: {}", market.name());
    tracing::info!("News: {}", news.name());

    let cache = Arc::new(NewsCache::new(config.news_cache_ttl));
    tracing::info!("News cache TTL: {}h", config.news_cache_ttl.num_hours());

    let engine = RecommendationEngine::new(
        market,
        news,
        cache,
        Arc::new(SentimentScorer::new()),
        config.engine.clone(),
    );

    let app = build_router(AppState {
        engine: Arc::new(engine),
    });

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("crypto-advisor server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET /health                                - Health check");
    tracing::info!("  GET /api/recommendations?riskLevel=1..5    - Momentum-rank picks");
    tracing::info!("  GET /api/crypto-recommendations?riskLevel= - Sentiment-filtered picks");

    axum::serve(listener, app).await?;

    Ok(())
}

type Sources = (Arc<dyn MarketDataSource>, Arc<dyn NewsSource>);

fn build_sources(config: &AdvisorConfig) -> anyhow::Result<Sources> {
    if config.use_mock_data {
        tracing::warn!("ADVISOR_MOCK_DATA set - serving static demo data");
        return Ok((
            Arc::new(MockMarketData::new()),
            Arc::new(MockNewsSource::demo()),
        ));
    }

    let market = CoinGeckoClient::from_config(config)?;
    let news = NewsApiClient::from_config(config)?;

    if !news.is_configured() {
        tracing::warn!("NEWS_API_KEY not set - sentiment-filtered picks will see neutral news");
    }

    Ok((Arc::new(market), Arc::new(news)))
}
