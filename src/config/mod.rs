use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::i18n::TargetLanguage;

/// Name of the config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "scout.toml";

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "gemini")]
    #[default]
    Gemini,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "gemini" => Ok(LLMProvider::Gemini),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// How the final report is rendered
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown report
    #[default]
    Text,
    /// Pretty-printed research state
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "markdown" | "md" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// LLM模型配置
    pub llm: LLMConfig,

    /// Search and scrape provider
    pub search: SearchConfig,

    /// Research breadth and content limits
    pub research: ResearchConfig,

    /// 缓存配置
    pub cache: CacheConfig,

    /// Language of the generated descriptions and recommendation
    pub target_language: TargetLanguage,

    pub output_format: OutputFormat,

    /// Where the rendered report is saved, if anywhere
    pub output_path: Option<PathBuf>,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址 (honoured by the OpenAI-compatible providers)
    pub api_base_url: String,

    /// Model used for regular calls
    pub model_efficient: String,

    /// Model used for oversized prompts and as the fallback when the efficient one keeps failing
    pub model_powerful: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,
}

/// Firecrawl search/scrape configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub api_key: String,

    pub api_base_url: String,

    /// HTTP timeout per request (seconds)
    pub timeout_seconds: u64,
}

/// Pipeline limits
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ResearchConfig {
    /// Hard cap on the number of researched tools
    pub max_tools: usize,

    /// Number of articles searched during tool extraction
    pub extraction_results: usize,

    /// Characters taken from each scraped article during tool extraction
    pub extraction_snippet_chars: usize,

    /// Appended to the query to bias the article search toward comparisons
    pub article_query_suffix: String,
}

/// 缓存配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// 是否启用缓存
    pub enabled: bool,

    /// 缓存目录
    pub cache_dir: PathBuf,

    /// 缓存过期时间（小时）
    pub expire_hours: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Loads the explicit config file, or `scout.toml` from the working directory, or the defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let default_path = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::from_file(&default_path)
        } else {
            Ok(Config::default())
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("SCOUT_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://generativelanguage.googleapis.com"),
            model_efficient: String::from("gemini-2.5-flash"),
            model_powerful: String::from("gemini-2.5-pro"),
            max_tokens: 8192,
            temperature: 0.1,
            retry_attempts: 3,
            retry_delay_ms: 2000,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("FIRECRAWL_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.firecrawl.dev"),
            timeout_seconds: 60,
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_tools: 5,
            extraction_results: 5,
            extraction_snippet_chars: 1000,
            article_query_suffix: String::from("tools comparison for best alternative"),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_dir: PathBuf::from(".scout/cache"),
            expire_hours: 24,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
