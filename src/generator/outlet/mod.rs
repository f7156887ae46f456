use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

use crate::config::OutputFormat;
use crate::i18n::TargetLanguage;
use crate::types::research::{CompanyInfo, ResearchState};

/// Renders the final state in the requested format
pub fn render(
    state: &ResearchState,
    format: OutputFormat,
    language: TargetLanguage,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_markdown(state, language)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(state).context("Failed to serialize research state")
        }
    }
}

/// Markdown report: one section per company, then the recommendation
pub fn render_markdown(state: &ResearchState, language: TargetLanguage) -> String {
    let mut report = format!("# Developer tools research: {}\n\n", state.query);

    if state.companies.is_empty() {
        report.push_str("_No tools could be researched for this query._\n\n");
    }
    for (index, company) in state.companies.iter().enumerate() {
        render_company(&mut report, index + 1, company);
    }

    let _ = writeln!(report, "## {}\n", language.recommendation_heading());
    match state.analysis.as_deref().map(str::trim) {
        Some(analysis) if !analysis.is_empty() => {
            report.push_str(analysis);
            report.push('\n');
        }
        _ => report.push_str("_No recommendation was produced._\n"),
    }

    report
}

fn render_company(report: &mut String, position: usize, company: &CompanyInfo) {
    let _ = writeln!(report, "## {}. {}\n", position, company.name);
    if !company.website.is_empty() {
        let _ = writeln!(report, "- **Website**: {}", company.website);
    }
    let _ = writeln!(report, "- **Pricing**: {}", company.pricing_model);
    let _ = writeln!(report, "- **Open source**: {}", tri_state(company.is_open_source));
    let _ = writeln!(report, "- **API available**: {}", tri_state(company.api_available));
    let _ = writeln!(report, "- **Tech stack**: {}", list_or_dash(&company.tech_stack));
    let _ = writeln!(report, "- **Languages**: {}", list_or_dash(&company.language_support));
    let _ = writeln!(
        report,
        "- **Integrations**: {}",
        list_or_dash(&company.integration_capabilities)
    );

    let description = company.description.trim();
    if !description.is_empty() {
        let _ = writeln!(report, "\n{}", description);
    }
    report.push('\n');
}

fn tri_state(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "Unknown",
    }
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

pub trait Outlet {
    async fn save(&self, report: &str) -> Result<()>;
}

/// Prints the report to stdout
pub struct ConsoleOutlet;

impl Outlet for ConsoleOutlet {
    async fn save(&self, report: &str) -> Result<()> {
        println!("{}", report);
        Ok(())
    }
}

/// Writes the report to a file, creating parent directories as needed
pub struct DiskOutlet {
    path: PathBuf,
}

impl DiskOutlet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, report: &str) -> Result<()> {
        if let Some(parent_dir) = self.path.parent()
            && !parent_dir.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent_dir)
                .await
                .with_context(|| format!("Failed to create {}", parent_dir.display()))?;
        }

        tokio::fs::write(&self.path, report)
            .await
            .with_context(|| format!("Failed to write report to {}", self.path.display()))?;

        info!("💾 Report saved: {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::research::{CompanyAnalysis, PricingModel, ResearchUpdate};
    use tempfile::TempDir;

    fn sample_state() -> ResearchState {
        let mut qdrant = CompanyInfo::seeded("Qdrant", "https://qdrant.tech", "raw");
        qdrant.apply_analysis(CompanyAnalysis {
            pricing_model: PricingModel::Freemium,
            is_open_source: Some(true),
            tech_stack: vec!["Rust".to_string()],
            description: "Vector similarity search engine".to_string(),
            api_available: Some(true),
            language_support: vec!["Python".to_string(), "Go".to_string()],
            integration_capabilities: Vec::new(),
        });
        let bare = CompanyInfo::seeded("Chroma", "", "");

        ResearchState::new("vector database")
            .apply(ResearchUpdate::with_companies(vec![qdrant, bare]))
            .apply(ResearchUpdate::with_analysis("Pick Qdrant."))
    }

    #[test]
    fn test_markdown_report_sections() {
        let report = render_markdown(&sample_state(), TargetLanguage::English);

        assert!(report.starts_with("# Developer tools research: vector database"));
        assert!(report.contains("## 1. Qdrant"));
        assert!(report.contains("- **Pricing**: Freemium"));
        assert!(report.contains("- **Open source**: Yes"));
        assert!(report.contains("- **Languages**: Python, Go"));
        assert!(report.contains("- **Integrations**: -"));
        assert!(report.contains("## 2. Chroma"));
        assert!(report.contains("- **API available**: Unknown"));
        assert!(report.trim_end().ends_with("Pick Qdrant."));
    }

    #[test]
    fn test_markdown_report_company_order() {
        let report = render_markdown(&sample_state(), TargetLanguage::English);
        let qdrant = report.find("Qdrant").unwrap();
        let chroma = report.find("Chroma").unwrap();
        assert!(qdrant < chroma);
    }

    #[test]
    fn test_markdown_report_localized_heading() {
        let report = render_markdown(&sample_state(), TargetLanguage::German);
        assert!(report.contains("## Empfehlung"));
    }

    #[test]
    fn test_markdown_report_empty_state() {
        let report = render_markdown(&ResearchState::new("obscure-tool-xyz"), TargetLanguage::English);
        assert!(report.contains("_No tools could be researched"));
        assert!(report.contains("_No recommendation was produced._"));
    }

    #[test]
    fn test_json_render_decodes_to_state() {
        let state = sample_state();
        let json = render(&state, OutputFormat::Json, TargetLanguage::English).unwrap();
        let decoded: ResearchState = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, state);
    }

    #[tokio::test]
    async fn test_disk_outlet_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("scout.md");

        DiskOutlet::new(&path).save("# report").await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# report");
    }
}
