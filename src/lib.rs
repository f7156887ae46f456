pub mod cache;
pub mod cli;
pub mod config;
pub mod generator;
pub mod i18n;
pub mod llm;
pub mod search;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use generator::context::ResearchContext;
pub use generator::research::orchestrator::ResearchOrchestrator;
pub use generator::workflow::{launch, run_research};
pub use llm::LanguageModel;
pub use search::SearchProvider;
pub use types::research::{CompanyInfo, ResearchState};
