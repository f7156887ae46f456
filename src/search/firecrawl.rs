//! Firecrawl v1 REST client

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{ScrapedPage, SearchHit, SearchProvider};
use crate::config::SearchConfig;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("firecrawl request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("firecrawl returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("firecrawl reported an error: {0}")]
    Api(String),
}

#[derive(Debug, Serialize)]
struct ScrapeOptions {
    formats: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    limit: usize,
    #[serde(rename = "scrapeOptions")]
    scrape_options: ScrapeOptions,
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: Vec<&'static str>,
    #[serde(rename = "onlyMainContent")]
    only_main_content: bool,
}

#[derive(Debug, Default, Deserialize)]
struct PageMetadata {
    title: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    success: bool,
    #[serde(default)]
    data: Vec<SearchResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    url: String,
    title: Option<String>,
    description: Option<String>,
    markdown: Option<String>,
    #[serde(default)]
    metadata: PageMetadata,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    success: bool,
    data: Option<ScrapeData>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScrapeData {
    markdown: Option<String>,
    #[serde(default)]
    metadata: PageMetadata,
}

impl From<SearchResult> for SearchHit {
    fn from(result: SearchResult) -> Self {
        SearchHit {
            url: result.url,
            title: result.title.or(result.metadata.title),
            description: result.description.or(result.metadata.description),
            markdown: result.markdown,
        }
    }
}

impl SearchResponse {
    fn into_hits(self) -> Result<Vec<SearchHit>, SearchError> {
        if !self.success {
            return Err(SearchError::Api(
                self.error.unwrap_or_else(|| "search failed".to_string()),
            ));
        }
        Ok(self.data.into_iter().map(SearchHit::from).collect())
    }
}

impl ScrapeResponse {
    fn into_page(self) -> Result<Option<ScrapedPage>, SearchError> {
        if !self.success {
            return Err(SearchError::Api(
                self.error.unwrap_or_else(|| "scrape failed".to_string()),
            ));
        }
        Ok(self.data.and_then(|data| {
            data.markdown
                .filter(|markdown| !markdown.trim().is_empty())
                .map(|markdown| ScrapedPage {
                    markdown,
                    title: data.metadata.title,
                })
        }))
    }
}

/// Firecrawl search + scrape client
#[derive(Clone)]
pub struct FirecrawlClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FirecrawlClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            warn!("⚠️ No Firecrawl API key configured; requests will be sent unauthenticated");
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, SearchError>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let mut request = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }
        Ok(response.json::<R>().await?)
    }

    /// Search, typed error
    pub async fn search_hits(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        let request = SearchRequest {
            query,
            limit,
            scrape_options: ScrapeOptions {
                formats: vec!["markdown"],
            },
        };
        let response: SearchResponse = self.post("/v1/search", &request).await?;
        response.into_hits()
    }

    /// Scrape, typed error
    pub async fn scrape_page(&self, url: &str) -> Result<Option<ScrapedPage>, SearchError> {
        let request = ScrapeRequest {
            url,
            formats: vec!["markdown"],
            only_main_content: true,
        };
        let response: ScrapeResponse = self.post("/v1/scrape", &request).await?;
        response.into_page()
    }
}

#[async_trait]
impl SearchProvider for FirecrawlClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        debug!("🔍 Searching for \"{}\" (limit {})", query, limit);
        Ok(self.search_hits(query, limit).await?)
    }

    async fn scrape(&self, url: &str) -> Option<ScrapedPage> {
        if url.trim().is_empty() {
            return None;
        }
        debug!("📄 Scraping {}", url);
        match self.scrape_page(url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("⚠️ Failed to scrape {}: {}", url, e);
                None
            }
        }
    }
}
