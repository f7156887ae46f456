pub mod research;

pub use research::{
    CompanyAnalysis, CompanyInfo, PricingModel, ResearchPhase, ResearchState, ResearchUpdate,
};
