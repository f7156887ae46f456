use anyhow::Result;

use crate::config::Config;
use crate::llm::{LLMClient, LanguageModel};
use crate::search::{FirecrawlClient, SearchProvider};

/// Services and configuration shared by every research stage
pub struct ResearchContext<L = LLMClient, S = FirecrawlClient> {
    /// LLM调用器，用于与AI通信。
    pub llm: L,
    /// Web search and scrape provider
    pub search: S,
    /// 配置
    pub config: Config,
}

impl ResearchContext {
    /// Builds the production clients from configuration
    pub fn new(config: Config) -> Result<Self> {
        let llm = LLMClient::new(config.clone())?;
        let search = FirecrawlClient::new(&config.search)?;

        Ok(Self {
            llm,
            search,
            config,
        })
    }
}

impl<L, S> ResearchContext<L, S>
where
    L: LanguageModel,
    S: SearchProvider,
{
    /// Wires arbitrary providers, e.g. scripted ones in tests
    pub fn with_services(config: Config, llm: L, search: S) -> Self {
        Self {
            llm,
            search,
            config,
        }
    }
}
