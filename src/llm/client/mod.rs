//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{cache::CacheManager, config::Config, llm::client::utils::evaluate_befitting_model};

mod providers;
pub mod utils;

use providers::ProviderClient;

/// Cache category of free-text completions
const COMPLETION_CACHE: &str = "completion";
/// Cache category of structured extractions
const STRUCTURED_CACHE: &str = "structured";

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: Config,
    client: ProviderClient,
    cache: Arc<CacheManager>,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: Config) -> Result<Self> {
        let client = ProviderClient::new(&config.llm)?;
        let cache = Arc::new(CacheManager::new(config.cache.clone()));
        Ok(Self {
            client,
            config,
            cache,
        })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        info!(
            "🔄 Checking connection to {} ({})...",
            self.config.llm.provider, self.config.llm.model_efficient
        );
        match self
            .prompt_uncached("You are a helpful assistant.", "Hello")
            .await
        {
            Ok(_) => {
                info!("✅ Model connection OK");
                Ok(())
            }
            Err(e) => {
                warn!("❌ Model connection failed: {}", e);
                Err(e)
            }
        }
    }

    /// 通用重试逻辑，用于处理异步操作的重试机制
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let llm_config = &self.config.llm;
        let max_retries = llm_config.retry_attempts.max(1);
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    retries += 1;
                    warn!(
                        "❌ Model call failed, retrying ({} / {}): {}",
                        retries, max_retries, err
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(llm_config.retry_delay_ms))
                        .await;
                }
            }
        }
    }

    fn cache_key(system_prompt: &str, user_prompt: &str) -> String {
        format!("{}\n\n{}", system_prompt, user_prompt)
    }

    /// 数据提取方法
    pub async fn extract<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let cache_key = Self::cache_key(system_prompt, user_prompt);
        if let Some(cached) = self.cache.get::<T>(STRUCTURED_CACHE, &cache_key).await? {
            return Ok(cached);
        }

        let (befitting_model, fallover_model) =
            evaluate_befitting_model(&self.config.llm, system_prompt, user_prompt);

        let (result, model) = match self
            .extract_with_model::<T>(system_prompt, user_prompt, &befitting_model)
            .await
        {
            Ok(result) => (result, befitting_model),
            Err(e) => match fallover_model {
                Some(model) => {
                    warn!(
                        "❌ Extraction with {} failed after {} attempts, falling back to {}: {}",
                        befitting_model, self.config.llm.retry_attempts, model, e
                    );
                    let user_prompt_with_fixer = format!(
                        "{}\n\n**Note** A previous attempt at this task failed with the error \"{}\". Make sure this answer avoids it.",
                        user_prompt, e
                    );
                    let result = self
                        .extract_with_model::<T>(system_prompt, &user_prompt_with_fixer, &model)
                        .await?;
                    (result, model)
                }
                None => return Err(e),
            },
        };

        if let Err(e) = self
            .cache
            .set(STRUCTURED_CACHE, &cache_key, &result, Some(&model))
            .await
        {
            debug!("Failed to cache extraction result: {}", e);
        }
        Ok(result)
    }

    async fn extract_with_model<T>(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
    ) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let extractor = self
            .client
            .create_extractor::<T>(model, system_prompt, &self.config.llm)?;

        self.retry_with_backoff(|| async { extractor.extract(user_prompt).await })
            .await
    }

    /// 简化的单轮对话方法
    pub async fn prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let cache_key = Self::cache_key(system_prompt, user_prompt);
        if let Some(cached) = self
            .cache
            .get::<String>(COMPLETION_CACHE, &cache_key)
            .await?
        {
            return Ok(cached);
        }

        let response = self.prompt_uncached(system_prompt, user_prompt).await?;

        if let Err(e) = self
            .cache
            .set(
                COMPLETION_CACHE,
                &cache_key,
                &response,
                Some(&self.config.llm.model_efficient),
            )
            .await
        {
            debug!("Failed to cache completion: {}", e);
        }
        Ok(response)
    }

    async fn prompt_uncached(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let (model, _) = evaluate_befitting_model(&self.config.llm, system_prompt, user_prompt);
        let agent = self
            .client
            .create_agent(&model, system_prompt, &self.config.llm)?;

        self.retry_with_backoff(|| async { agent.prompt(user_prompt).await })
            .await
    }
}
