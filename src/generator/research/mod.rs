// Three-stage research pipeline
// 1. ToolExtractor: comparison articles -> candidate tool names
// 2. CompanyResearcher: one search + scrape + structured analysis per tool
// 3. RecommendationAdvisor: all company records -> final recommendation

use anyhow::Result;

use crate::generator::context::ResearchContext;
use crate::generator::research::orchestrator::ResearchOrchestrator;
use crate::llm::LanguageModel;
use crate::search::SearchProvider;
use crate::types::research::ResearchState;

pub mod agents;
pub mod orchestrator;
pub mod prompts;

/// 执行研究阶段
pub async fn execute<L, S>(context: &ResearchContext<L, S>, query: &str) -> Result<ResearchState>
where
    L: LanguageModel,
    S: SearchProvider,
{
    let orchestrator = ResearchOrchestrator;
    orchestrator.run(context, query).await
}
