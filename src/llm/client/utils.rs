use crate::config::LLMConfig;

/// Prompts above this size (bytes) go straight to the powerful model
pub const EFFICIENT_PROMPT_LIMIT: usize = 32 * 1024;

/// Picks the model for a call, plus the fallback to try when it keeps failing
pub fn evaluate_befitting_model(
    llm_config: &LLMConfig,
    system_prompt: &str,
    user_prompt: &str,
) -> (String, Option<String>) {
    if system_prompt.len() + user_prompt.len() > EFFICIENT_PROMPT_LIMIT {
        return (llm_config.model_powerful.clone(), None);
    }

    let fallover = (llm_config.model_efficient != llm_config.model_powerful)
        .then(|| llm_config.model_powerful.clone());
    (llm_config.model_efficient.clone(), fallover)
}
