use anyhow::Result;
use tracing::{debug, info};

use crate::generator::context::ResearchContext;
use crate::generator::research::agents::{
    CompanyResearcher, RecommendationAdvisor, ResearchStage, ToolExtractor,
};
use crate::generator::workflow::TimingScope;
use crate::llm::LanguageModel;
use crate::search::SearchProvider;
use crate::types::research::{ResearchPhase, ResearchState};

/// Runs the three research stages in their fixed order
#[derive(Default)]
pub struct ResearchOrchestrator;

impl ResearchOrchestrator {
    /// start → extract_tools → research → analyze → done, each stage exactly once
    pub async fn run<L, S>(&self, context: &ResearchContext<L, S>, query: &str) -> Result<ResearchState>
    where
        L: LanguageModel,
        S: SearchProvider,
    {
        info!("🚀 Starting research for: {}", query);
        let mut timing = TimingScope::new();

        let mut state = ResearchState::new(query);
        let mut phase = ResearchPhase::Start;
        loop {
            phase = phase.next();
            state = match phase {
                ResearchPhase::ExtractingTools => {
                    self.execute_stage(&ToolExtractor, context, state, &mut timing)
                        .await?
                }
                ResearchPhase::Researching => {
                    self.execute_stage(&CompanyResearcher, context, state, &mut timing)
                        .await?
                }
                ResearchPhase::Analyzing => {
                    self.execute_stage(&RecommendationAdvisor, context, state, &mut timing)
                        .await?
                }
                ResearchPhase::Start | ResearchPhase::Done => break,
            };
        }

        debug!("{}", timing.generate_timing_report());
        info!(
            "✓ Research finished ({}) with {} companies",
            phase,
            state.companies.len()
        );
        Ok(state)
    }

    async fn execute_stage<T, L, S>(
        &self,
        stage: &T,
        context: &ResearchContext<L, S>,
        state: ResearchState,
        timing: &mut TimingScope,
    ) -> Result<ResearchState>
    where
        T: ResearchStage,
        L: LanguageModel,
        S: SearchProvider,
    {
        let phase = stage.phase();
        debug!("🤖 Entering phase {}", phase);

        timing.start_phase(phase.as_str());
        let update = stage.run(context, &state).await?;
        if let Some(duration) = timing.end_phase(phase.as_str()) {
            debug!("✓ Phase {} done in {:.2}s", phase, duration.as_secs_f64());
        }

        Ok(state.apply(update))
    }
}
