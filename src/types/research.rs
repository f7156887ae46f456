use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Description recorded when the structured analysis of a company fails
pub const FAILED_ANALYSIS_DESCRIPTION: &str = "failed to analyze";

/// Pricing model of a developer tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum PricingModel {
    #[serde(alias = "free", alias = "FREE")]
    Free,
    #[serde(alias = "freemium", alias = "FREEMIUM")]
    Freemium,
    #[serde(alias = "paid", alias = "PAID")]
    Paid,
    #[serde(alias = "enterprise", alias = "ENTERPRISE")]
    Enterprise,
    // anything the model could not place in the other buckets
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for PricingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingModel::Free => write!(f, "Free"),
            PricingModel::Freemium => write!(f, "Freemium"),
            PricingModel::Paid => write!(f, "Paid"),
            PricingModel::Enterprise => write!(f, "Enterprise"),
            PricingModel::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Structured analysis demanded from the language model for one company.
///
/// The doc comments on the fields end up in the JSON schema handed to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompanyAnalysis {
    /// One of "Free", "Freemium", "Paid", "Enterprise" or "Unknown"
    pub pricing_model: PricingModel,
    /// true if open source, false if proprietary, null if unclear
    pub is_open_source: Option<bool>,
    /// Technologies used or supported, e.g. React, PostgreSQL, Docker, GraphQL
    pub tech_stack: Vec<String>,
    /// A short one-sentence explanation of what this tool offers to developers
    pub description: String,
    /// true if APIs, SDKs or other programmatic interfaces are available, null if unclear
    pub api_available: Option<bool>,
    /// Explicitly supported programming languages, e.g. JavaScript, Python, Go
    pub language_support: Vec<String>,
    /// Tools and services it integrates with, e.g. GitHub, AWS, VS Code, Slack
    pub integration_capabilities: Vec<String>,
}

impl CompanyAnalysis {
    /// Value substituted when the structured analysis call fails
    pub fn unknown() -> Self {
        Self {
            pricing_model: PricingModel::Unknown,
            is_open_source: None,
            tech_stack: Vec::new(),
            description: FAILED_ANALYSIS_DESCRIPTION.to_string(),
            api_available: None,
            language_support: Vec::new(),
            integration_capabilities: Vec::new(),
        }
    }
}

/// One researched tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub description: String,
    /// Best effort, empty when the search hit carried no URL
    pub website: String,
    pub pricing_model: PricingModel,
    pub is_open_source: Option<bool>,
    pub tech_stack: Vec<String>,
    pub api_available: Option<bool>,
    pub language_support: Vec<String>,
    pub integration_capabilities: Vec<String>,
}

impl CompanyInfo {
    /// Bare record built from a search hit, every analysis field unknown
    pub fn seeded(
        name: impl Into<String>,
        website: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            website: website.into(),
            pricing_model: PricingModel::Unknown,
            is_open_source: None,
            tech_stack: Vec::new(),
            api_available: None,
            language_support: Vec::new(),
            integration_capabilities: Vec::new(),
        }
    }

    /// Overwrites every analysis-derived field
    pub fn apply_analysis(&mut self, analysis: CompanyAnalysis) {
        self.pricing_model = analysis.pricing_model;
        self.is_open_source = analysis.is_open_source;
        self.tech_stack = dedup_entries(analysis.tech_stack);
        self.description = analysis.description;
        self.api_available = analysis.api_available;
        self.language_support = dedup_entries(analysis.language_support);
        self.integration_capabilities = dedup_entries(analysis.integration_capabilities);
    }
}

/// The list fields have set semantics: blanks go, and the first spelling of a case-insensitive duplicate wins.
fn dedup_entries(entries: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .filter(|entry| seen.insert(entry.to_lowercase()))
        .collect()
}

/// Pipeline phases, strictly linear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchPhase {
    Start,
    ExtractingTools,
    Researching,
    Analyzing,
    Done,
}

impl ResearchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchPhase::Start => "start",
            ResearchPhase::ExtractingTools => "extract_tools",
            ResearchPhase::Researching => "research",
            ResearchPhase::Analyzing => "analyze",
            ResearchPhase::Done => "done",
        }
    }

    /// The phase that follows this one; `Done` is terminal
    pub fn next(&self) -> Self {
        match self {
            ResearchPhase::Start => ResearchPhase::ExtractingTools,
            ResearchPhase::ExtractingTools => ResearchPhase::Researching,
            ResearchPhase::Researching => ResearchPhase::Analyzing,
            ResearchPhase::Analyzing | ResearchPhase::Done => ResearchPhase::Done,
        }
    }
}

impl std::fmt::Display for ResearchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State threaded through the pipeline.
///
/// Stages never mutate it; they return a [`ResearchUpdate`] that the orchestrator merges with [`ResearchState::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchState {
    pub query: String,
    /// `None` until tool extraction ran
    pub extracted_tools: Option<Vec<String>>,
    pub companies: Vec<CompanyInfo>,
    /// `None` until the recommendation was synthesized
    pub analysis: Option<String>,
}

impl ResearchState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Merges a partial update; fields the update leaves unset are kept
    pub fn apply(self, update: ResearchUpdate) -> Self {
        Self {
            query: self.query,
            extracted_tools: update.extracted_tools.or(self.extracted_tools),
            companies: update.companies.unwrap_or(self.companies),
            analysis: update.analysis.or(self.analysis),
        }
    }

    /// Extracted tool names, empty before extraction ran
    pub fn extracted_tool_names(&self) -> &[String] {
        self.extracted_tools.as_deref().unwrap_or_default()
    }
}

/// Partial state produced by one stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResearchUpdate {
    pub extracted_tools: Option<Vec<String>>,
    pub companies: Option<Vec<CompanyInfo>>,
    pub analysis: Option<String>,
}

impl ResearchUpdate {
    pub fn with_extracted_tools(tools: Vec<String>) -> Self {
        Self {
            extracted_tools: Some(tools),
            ..Default::default()
        }
    }

    pub fn with_companies(companies: Vec<CompanyInfo>) -> Self {
        Self {
            companies: Some(companies),
            ..Default::default()
        }
    }

    pub fn with_analysis(analysis: impl Into<String>) -> Self {
        Self {
            analysis: Some(analysis.into()),
            ..Default::default()
        }
    }
}
