use anyhow::Result;
use async_trait::async_trait;

use crate::generator::context::ResearchContext;
use crate::llm::LanguageModel;
use crate::search::SearchProvider;
use crate::types::research::{ResearchPhase, ResearchState, ResearchUpdate};

pub mod company_researcher;
pub mod recommendation_advisor;
pub mod tool_extractor;

pub use company_researcher::CompanyResearcher;
pub use recommendation_advisor::RecommendationAdvisor;
pub use tool_extractor::ToolExtractor;

/// One pipeline stage: reads the current state, returns a partial update
#[async_trait]
pub trait ResearchStage: Send + Sync {
    /// Phase this stage implements
    fn phase(&self) -> ResearchPhase;

    async fn run<L, S>(
        &self,
        context: &ResearchContext<L, S>,
        state: &ResearchState,
    ) -> Result<ResearchUpdate>
    where
        L: LanguageModel,
        S: SearchProvider;
}
