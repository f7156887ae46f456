use crate::config::{Config, LLMProvider, OutputFormat};
use crate::i18n::TargetLanguage;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;

/// devtools-scout - researches developer tools for a query and recommends the best fit
#[derive(Parser, Debug)]
#[command(name = "devtools-scout")]
#[command(
    about = "Finds developer tools matching a query, researches each one on the web and recommends the best fit."
)]
#[command(version)]
pub struct Args {
    /// What you are looking for, e.g. "vector database"
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// LLM Provider (openai, anthropic, gemini, deepseek, openrouter, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// 高能效模型，用于常规的抽取与分析
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型，作为efficient失效情况下的兜底
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Firecrawl API key
    #[arg(long)]
    pub firecrawl_api_key: Option<String>,

    /// Firecrawl base URL, e.g. a self-hosted instance
    #[arg(long)]
    pub firecrawl_base_url: Option<String>,

    /// Maximum number of tools researched
    #[arg(long)]
    pub max_tools: Option<usize>,

    /// 目标语言 (en, zh, ja, ko, de, fr, ru)
    #[arg(long)]
    pub target_language: Option<String>,

    /// Report format (text, json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Also save the report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 是否禁用缓存
    #[arg(long)]
    pub no_cache: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The positional words joined into one query
    pub fn query(&self) -> String {
        self.query.join(" ")
    }

    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let config = Config::load(self.config.as_deref())?;
        Ok(self.apply_overrides(config))
    }

    /// Applies the flags on top of an already loaded config
    pub fn apply_overrides(self, mut config: Config) -> Config {
        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            match provider_str.parse::<LLMProvider>() {
                Ok(provider) => config.llm.provider = provider,
                Err(_) => warn!(
                    "⚠️ Unknown provider: {}, keeping {}",
                    provider_str, config.llm.provider
                ),
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        // Firecrawl
        if let Some(firecrawl_api_key) = self.firecrawl_api_key {
            config.search.api_key = firecrawl_api_key;
        }
        if let Some(firecrawl_base_url) = self.firecrawl_base_url {
            config.search.api_base_url = firecrawl_base_url;
        }

        if let Some(max_tools) = self.max_tools {
            config.research.max_tools = max_tools;
        }

        // 目标语言配置
        if let Some(target_language_str) = self.target_language {
            match target_language_str.parse::<TargetLanguage>() {
                Ok(target_language) => config.target_language = target_language,
                Err(_) => warn!(
                    "⚠️ Unknown target language: {}, keeping {}",
                    target_language_str,
                    config.target_language.display_name()
                ),
            }
        }

        if let Some(format) = self.format {
            config.output_format = format;
        }
        if let Some(output) = self.output {
            config.output_path = Some(output);
        }

        // 缓存配置
        if self.no_cache {
            config.cache.enabled = false;
        }
        config.verbose = config.verbose || self.verbose;

        config
    }
}
