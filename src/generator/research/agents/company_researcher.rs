use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::ResearchStage;
use crate::generator::context::ResearchContext;
use crate::generator::research::prompts::{self, ANALYSIS_CONTENT_LIMIT};
use crate::llm::LanguageModel;
use crate::search::{SearchHit, SearchProvider};
use crate::types::research::{
    CompanyAnalysis, CompanyInfo, ResearchPhase, ResearchState, ResearchUpdate,
};
use crate::utils::text::truncate_chars;

/// Name used for fallback hits that carry no title
pub const UNKNOWN_TOOL_NAME: &str = "unknown";

/// Turns tool names into `CompanyInfo` records: one search, one scrape and one structured analysis per tool.
#[derive(Default)]
pub struct CompanyResearcher;

/// Tool names derived from search-hit titles when extraction produced nothing.
///
/// Missing titles become [`UNKNOWN_TOOL_NAME`]; repeated names collapse to their first occurrence.
pub fn fallback_tool_names(hits: &[SearchHit], limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    hits.iter()
        .map(|hit| {
            hit.title
                .as_deref()
                .map(str::trim)
                .filter(|title| !title.is_empty())
                .unwrap_or(UNKNOWN_TOOL_NAME)
                .to_string()
        })
        .filter(|name| seen.insert(name.clone()))
        .take(limit)
        .collect()
}

impl CompanyResearcher {
    async fn resolve_tool_names<L, S>(
        &self,
        context: &ResearchContext<L, S>,
        state: &ResearchState,
    ) -> Vec<String>
    where
        L: LanguageModel,
        S: SearchProvider,
    {
        let max_tools = context.config.research.max_tools;
        let extracted = state.extracted_tool_names();
        if !extracted.is_empty() {
            return extracted.iter().take(max_tools).cloned().collect();
        }

        info!("   No tools extracted, falling back to a direct search");
        let fallback_results = context.config.research.extraction_results;
        match context.search.search(&state.query, fallback_results).await {
            Ok(hits) => fallback_tool_names(&hits, max_tools),
            Err(e) => {
                warn!("⚠️ Fallback search failed: {:#}", e);
                Vec::new()
            }
        }
    }

    async fn research_tool<L, S>(
        &self,
        context: &ResearchContext<L, S>,
        tool_name: &str,
    ) -> Option<CompanyInfo>
    where
        L: LanguageModel,
        S: SearchProvider,
    {
        let hits = match context.search.search(tool_name, 1).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("⚠️ Search for {} failed, skipping: {:#}", tool_name, e);
                return None;
            }
        };
        let Some(hit) = hits.into_iter().next() else {
            debug!("   No search result for {}, skipping", tool_name);
            return None;
        };

        let mut company = CompanyInfo::seeded(tool_name, hit.url.as_str(), hit.snippet());

        if let Some(page) = context.search.scrape(&company.website).await {
            if let Some(title) = &page.title {
                debug!("   Scraped {} for {}", title, tool_name);
            }
            let content = truncate_chars(&page.markdown, ANALYSIS_CONTENT_LIMIT);
            let analysis = self
                .analyze_company_content(context, &company.name, content)
                .await;
            company.apply_analysis(analysis);
        } else {
            debug!("   Could not scrape {} for {}", company.website, tool_name);
        }

        Some(company)
    }

    async fn analyze_company_content<L, S>(
        &self,
        context: &ResearchContext<L, S>,
        company_name: &str,
        content: &str,
    ) -> CompanyAnalysis
    where
        L: LanguageModel,
        S: SearchProvider,
    {
        let system_prompt =
            prompts::with_language(prompts::TOOL_ANALYSIS_SYSTEM, context.config.target_language);
        let user_prompt = prompts::tool_analysis_user(company_name, content);

        match context
            .llm
            .complete_structured::<CompanyAnalysis>(&system_prompt, &user_prompt)
            .await
        {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("⚠️ Failed to analyze {}: {:#}", company_name, e);
                CompanyAnalysis::unknown()
            }
        }
    }
}

#[async_trait]
impl ResearchStage for CompanyResearcher {
    fn phase(&self) -> ResearchPhase {
        ResearchPhase::Researching
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
        let tool_names = self.resolve_tool_names(context, state).await;
        info!(
            "🔬 Researching {} tools: {}",
            tool_names.len(),
            tool_names.join(", ")
        );

        let max_tools = context.config.research.max_tools;
        let mut companies = Vec::with_capacity(tool_names.len().min(max_tools));
        for tool_name in &tool_names {
            if companies.len() >= max_tools {
                break;
            }
            if let Some(company) = self.research_tool(context, tool_name).await {
                companies.push(company);
            }
        }

        Ok(ResearchUpdate::with_companies(companies))
    }
}
