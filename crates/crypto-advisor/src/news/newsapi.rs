//! NewsAPI Client
//!
//! Searches `/everything` for headlines mentioning an asset.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::NewsSource;
use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, Result};
use crate::model::NewsArticle;

/// HTTP client for newsapi.org
pub struct NewsApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    page_size: u32,
}

impl NewsApiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        page_size: u32,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("crypto-advisor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            page_size: page_size.clamp(1, 100),
        })
    }

    pub fn from_config(config: &AdvisorConfig) -> Result<Self> {
        Self::new(
            &config.news_api_base_url,
            config.news_api_key.clone(),
            config.news_page_size,
            config.http_timeout,
        )
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch_news_articles(&self, asset_name: &str) -> Result<Vec<NewsArticle>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AdvisorError::Config("NEWS_API_KEY is not set".into()))?;

        let url = format!("{}/everything", self.base_url);
        let page_size = self.page_size.to_string();

        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", api_key)
            .query(&[
                ("q", asset_name),
                ("sortBy", "publishedAt"),
                ("language", "en"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::NewsUnavailable(format!(
                "NewsAPI returned HTTP {status} for {asset_name}"
            )));
        }

        let body: EverythingResponse = response.json().await?;
        if body.status != "ok" {
            return Err(AdvisorError::NewsUnavailable(
                body.message.unwrap_or_else(|| format!("NewsAPI status {}", body.status)),
            ));
        }

        Ok(body
            .articles
            .into_iter()
            .filter_map(RawArticle::into_article)
            .collect())
    }

    fn name(&self) -> &str {
        "NewsAPI"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    source: Option<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    #[serde(default)]
    name: Option<String>,
}

impl RawArticle {
    /// Untitled and removed articles carry no signal
    fn into_article(self) -> Option<NewsArticle> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty() && t != "[Removed]")?;

        Some(NewsArticle {
            title,
            published_at: self.published_at,
            url: self.url,
            source: self.source.and_then(|s| s.name),
        })
    }
}
