//! Language-model facade

use anyhow::Result;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod client;

pub use client::LLMClient;

/// What the research pipeline needs from a language model
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Free-text completion for a system + user message pair
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// Completion decoded into `T`, whose JSON schema is handed to the model
    async fn complete_structured<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static;
}

#[async_trait]
impl LanguageModel for LLMClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.prompt(system_prompt, user_prompt).await
    }

    async fn complete_structured<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        self.extract(system_prompt, user_prompt).await
    }
}
