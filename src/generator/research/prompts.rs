//! Prompt templates for the three research stages.
//!
//! Every function here is pure: the same inputs always render the same text.

use crate::i18n::TargetLanguage;
use crate::utils::text::truncate_chars;

/// Upper bound on website content interpolated into the analysis prompt (characters)
pub const ANALYSIS_CONTENT_LIMIT: usize = 2500;

pub const TOOL_EXTRACTION_SYSTEM: &str = r#"You are an AI research assistant specializing in developer technologies.
Your task is to extract the names of actual tools, libraries, platforms, or services that developers can use.
Focus on tangible products developers can directly apply in their work. Avoid abstract concepts, methodologies, or general features."#;

pub fn tool_extraction_user(query: &str, content: &str) -> String {
    format!(
        r#"Query: {query}
Article Content: {content}

From the content above, extract a list of actual developer tools, libraries, platforms, or services that are relevant to the topic: "{query}".

Rules:
- Only include real, usable products (e.g., SDKs, APIs, platforms, dev tools)
- Avoid general concepts like "cloud", "CI/CD", or "frontend framework"
- Include both open-source and commercial tools
- Choose the 5 most relevant to developers
- Return one tool name per line with no numbering or description

Example format:
Supabase
PlanetScale
Railway
Appwrite
Nhost"#
    )
}

pub const TOOL_ANALYSIS_SYSTEM: &str = r#"You are an expert analyst reviewing developer tools and platforms.
Focus only on aspects that matter to developers: programming languages, frameworks, SDKs, APIs, integrations, and development workflows.
Avoid business or marketing details unless they directly impact the developer experience."#;

/// Renders the per-company analysis prompt; `content` is cut to [`ANALYSIS_CONTENT_LIMIT`] characters.
pub fn tool_analysis_user(company_name: &str, content: &str) -> String {
    let content = truncate_chars(content, ANALYSIS_CONTENT_LIMIT);
    format!(
        r#"Company/Tool: {company_name}
Website Content: {content}

From the content above, analyze and extract key developer-focused information in the following structure:

- pricing_model: One of "Free", "Freemium", "Paid", "Enterprise", or "Unknown"
- is_open_source: true if open source, false if proprietary, null if unclear
- tech_stack: List of technologies used or supported (e.g., React, PostgreSQL, Docker, GraphQL)
- description: A short one-sentence explanation of what this tool offers to developers
- api_available: true if APIs, SDKs, or programmatic interfaces are available
- language_support: List of explicitly supported languages (e.g., JavaScript, Python, Go)
- integration_capabilities: List of tools/services it integrates with (e.g., GitHub, AWS, VS Code, Slack)

Only include information directly relevant to developers and engineering workflows."#
    )
}

pub const RECOMMENDATIONS_SYSTEM: &str = r#"You are a senior software engineer helping developers choose the best tools for their needs.
Keep your advice short, clear, and focused on technical advantages, pricing, and integration support.
Your goal is to guide developers to the best fit tool with just a few high-impact sentences."#;

pub fn recommendations_user(query: &str, company_data: &str) -> String {
    format!(
        r#"Developer Query: {query}
Tools/Technologies Analyzed: {company_data}

Based on the tools above, write a brief recommendation (3-4 sentences) that includes:
- The best tool for the use case and why
- Any key cost or pricing consideration
- A core technical advantage or integration benefit

Keep it concise, technical, and actionable."#
    )
}

/// Appends the output-language instruction to a system prompt
pub fn with_language(system_prompt: &str, language: TargetLanguage) -> String {
    format!("{}\n\n{}", system_prompt, language.prompt_instruction())
}
