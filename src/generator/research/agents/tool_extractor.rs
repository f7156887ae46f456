use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::ResearchStage;
use crate::generator::context::ResearchContext;
use crate::generator::research::prompts;
use crate::llm::LanguageModel;
use crate::search::SearchProvider;
use crate::types::research::{ResearchPhase, ResearchState, ResearchUpdate};
use crate::utils::text::{non_blank_lines, truncate_chars};

/// Extracts candidate tool names from comparison articles found on the web.
///
/// Failures never leave this stage: they are logged and turn into an empty tool list.
#[derive(Default)]
pub struct ToolExtractor;

/// Query biased toward comparison and alternative articles
pub fn article_query(query: &str, suffix: &str) -> String {
    if suffix.trim().is_empty() {
        return query.to_string();
    }
    format!("{} {}", query, suffix.trim())
}

/// One tool name per non-blank line of the model response, order kept, no dedup
pub fn parse_tool_names(response: &str) -> Vec<String> {
    non_blank_lines(response)
}

impl ToolExtractor {
    async fn extract_tools<L, S>(
        &self,
        context: &ResearchContext<L, S>,
        query: &str,
    ) -> Result<Vec<String>>
    where
        L: LanguageModel,
        S: SearchProvider,
    {
        let research = &context.config.research;
        let article_query = article_query(query, &research.article_query_suffix);

        let hits = context
            .search
            .search(&article_query, research.extraction_results)
            .await
            .with_context(|| format!("Article search failed for \"{}\"", article_query))?;
        debug!("   Found {} articles", hits.len());

        let mut all_content = String::new();
        for hit in &hits {
            if let Some(page) = context.search.scrape(&hit.url).await {
                debug!(
                    "   Read article: {}",
                    page.title.as_deref().unwrap_or(hit.url.as_str())
                );
                all_content.push_str(truncate_chars(
                    &page.markdown,
                    research.extraction_snippet_chars,
                ));
                all_content.push_str("\n\n");
            }
        }

        let response = context
            .llm
            .complete(
                prompts::TOOL_EXTRACTION_SYSTEM,
                &prompts::tool_extraction_user(query, &all_content),
            )
            .await
            .context("Tool extraction prompt failed")?;

        Ok(parse_tool_names(&response))
    }
}

#[async_trait]
impl ResearchStage for ToolExtractor {
    fn phase(&self) -> ResearchPhase {
        ResearchPhase::ExtractingTools
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
        info!("🔎 Extracting tools for query: {}", state.query);

        let tools = match self.extract_tools(context, &state.query).await {
            Ok(tools) => {
                let preview: Vec<&str> = tools
                    .iter()
                    .take(context.config.research.max_tools)
                    .map(String::as_str)
                    .collect();
                info!("   Extracted tools: {}", preview.join(", "));
                tools
            }
            Err(e) => {
                warn!("⚠️ Error during tool extraction: {:#}", e);
                Vec::new()
            }
        };

        Ok(ResearchUpdate::with_extracted_tools(tools))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_query_appends_suffix() {
        assert_eq!(
            article_query("vector database", "tools comparison for best alternative"),
            "vector database tools comparison for best alternative"
        );
    }

    #[test]
    fn test_article_query_without_suffix() {
        assert_eq!(article_query("vector database", "  "), "vector database");
    }

    #[test]
    fn test_parse_tool_names_keeps_order_and_duplicates() {
        let names = parse_tool_names("Pinecone\n  Weaviate  \n\nQdrant\nPinecone\n");
        assert_eq!(names, vec!["Pinecone", "Weaviate", "Qdrant", "Pinecone"]);
    }

    #[test]
    fn test_parse_tool_names_never_exceeds_non_blank_lines() {
        let response = "A\n\n \nB\nC\n";
        let non_blank = response.lines().filter(|l| !l.trim().is_empty()).count();
        assert!(parse_tool_names(response).len() <= non_blank);
    }
}
