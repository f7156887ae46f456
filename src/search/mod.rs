//! Search and scrape facade

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod firecrawl;

pub use firecrawl::{FirecrawlClient, SearchError};

/// One web search result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Page content when the provider scraped the hit along with the search
    pub markdown: Option<String>,
}

impl SearchHit {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = Some(markdown.into());
        self
    }

    /// Raw text used as a description before any analysis ran
    pub fn snippet(&self) -> &str {
        self.markdown
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or_default()
    }
}

/// A page converted to markdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedPage {
    pub markdown: String,
    pub title: Option<String>,
}

/// What the research pipeline needs from a web search provider
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Up to `limit` hits for `query`, in ranking order; no match is an empty list
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>>;

    /// Page content of `url`, or `None` when the page could not be fetched or converted
    async fn scrape(&self, url: &str) -> Option<ScrapedPage>;
}
