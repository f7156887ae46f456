use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use super::ResearchStage;
use crate::generator::context::ResearchContext;
use crate::generator::research::prompts;
use crate::llm::LanguageModel;
use crate::search::SearchProvider;
use crate::types::research::{CompanyInfo, ResearchPhase, ResearchState, ResearchUpdate};

/// Synthesizes the final recommendation from the researched companies.
///
/// Unlike the earlier stages, a model failure here is returned to the caller.
#[derive(Default)]
pub struct RecommendationAdvisor;

/// Each company as compact JSON, joined by `", "`
pub fn serialize_companies(companies: &[CompanyInfo]) -> Result<String> {
    let entries = companies
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries.join(", "))
}

#[async_trait]
impl ResearchStage for RecommendationAdvisor {
    fn phase(&self) -> ResearchPhase {
        ResearchPhase::Analyzing
    }

    async fn run<L, S>(
        &self,
        context: &ResearchContext<L, S>,
        state: &ResearchState,
    ) -> Result<ResearchUpdate>
    where
        L: LanguageModel,
        S: SearchProvider,
    {
        info!(
            "🧠 Generating recommendations from {} companies",
            state.companies.len()
        );

        let company_data = serialize_companies(&state.companies)?;
        let system_prompt =
            prompts::with_language(prompts::RECOMMENDATIONS_SYSTEM, context.config.target_language);
        let user_prompt = prompts::recommendations_user(&state.query, &company_data);

        let analysis = context
            .llm
            .complete(&system_prompt, &user_prompt)
            .await
            .context("Failed to synthesize the final recommendation")?;

        Ok(ResearchUpdate::with_analysis(analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_no_companies_is_empty() {
        assert_eq!(serialize_companies(&[]).unwrap(), "");
    }

    #[test]
    fn test_serialize_companies_joined() {
        let companies = vec![
            CompanyInfo::seeded("Qdrant", "https://qdrant.tech", "Vector search engine"),
            CompanyInfo::seeded("Chroma", "https://trychroma.com", ""),
        ];
        let data = serialize_companies(&companies).unwrap();

        let parts: Vec<&str> = data.split("}, {").collect();
        assert_eq!(parts.len(), 2);
        assert!(data.starts_with("{\"name\":\"Qdrant\""));
        assert!(data.contains("\"website\":\"https://trychroma.com\""));
    }

    #[test]
    fn test_serialized_company_decodes_back() {
        let company = CompanyInfo::seeded("Weaviate", "https://weaviate.io", "AI-native database");
        let data = serialize_companies(std::slice::from_ref(&company)).unwrap();
        let decoded: CompanyInfo = serde_json::from_str(&data).unwrap();
        assert_eq!(decoded, company);
    }
}
