#[cfg(test)]
mod tests {
    use crate::config::{Config, OutputFormat};
    use crate::generator::workflow::{TimingScope, publish};
    use crate::types::research::{CompanyInfo, ResearchState, ResearchUpdate};
    use std::time::Duration;
    use tempfile::TempDir;

    fn finished_state() -> ResearchState {
        ResearchState::new("vector database")
            .apply(ResearchUpdate::with_extracted_tools(vec!["Qdrant".to_string()]))
            .apply(ResearchUpdate::with_companies(vec![CompanyInfo::seeded(
                "Qdrant",
                "https://qdrant.tech",
                "Vector search engine",
            )]))
            .apply(ResearchUpdate::with_analysis("Qdrant fits best."))
    }

    #[test]
    fn test_timing_scope_records_phases_in_order() {
        let mut timing = TimingScope::new();
        timing.start_phase("extract_tools");
        std::thread::sleep(Duration::from_millis(2));
        timing.end_phase("extract_tools");
        timing.start_phase("research");
        timing.end_phase("research");

        let phases: Vec<&str> = timing
            .phase_durations()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(phases, vec!["extract_tools", "research"]);
        assert!(timing.phase_durations()[0].1 >= Duration::from_millis(2));
    }

    #[test]
    fn test_timing_scope_unknown_phase() {
        let mut timing = TimingScope::default();
        assert!(timing.end_phase("analyze").is_none());
        assert!(timing.phase_durations().is_empty());
    }

    #[test]
    fn test_timing_report_lists_phases() {
        let mut timing = TimingScope::new();
        timing.start_phase("analyze");
        timing.end_phase("analyze");

        let report = timing.generate_timing_report();
        assert!(report.starts_with("Total time:"));
        assert!(report.contains("- analyze:"));
    }

    #[tokio::test]
    async fn test_publish_writes_json_report() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("out").join("report.json");
        let config = Config {
            output_format: OutputFormat::Json,
            output_path: Some(output_path.clone()),
            ..Default::default()
        };

        let state = finished_state();
        publish(&config, &state).await.unwrap();

        let written = std::fs::read_to_string(&output_path).unwrap();
        let decoded: ResearchState = serde_json::from_str(&written).unwrap();
        assert_eq!(decoded, state);
    }

    #[tokio::test]
    async fn test_publish_writes_markdown_report() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("report.md");
        let config = Config {
            output_path: Some(output_path.clone()),
            ..Default::default()
        };

        publish(&config, &finished_state()).await.unwrap();

        let written = std::fs::read_to_string(&output_path).unwrap();
        assert!(written.contains("## 1. Qdrant"));
        assert!(written.contains("Qdrant fits best."));
    }
}
