use crate::config::Config;
use crate::generator::context::ResearchContext;
use crate::generator::outlet::{self, ConsoleOutlet, DiskOutlet, Outlet};
use crate::llm::LanguageModel;
use crate::search::SearchProvider;
use crate::types::research::ResearchState;

use anyhow::Result;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::info;

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: HashMap<String, Instant>,
    phase_durations: Vec<(String, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: HashMap::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &str) {
        self.phase_start_times
            .insert(phase_name.to_string(), Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &str) -> Option<Duration> {
        let start_time = self.phase_start_times.remove(phase_name)?;
        let duration = start_time.elapsed();
        self.phase_durations
            .push((phase_name.to_string(), duration));
        Some(duration)
    }

    pub fn total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Finished phases in completion order
    pub fn phase_durations(&self) -> &[(String, Duration)] {
        &self.phase_durations
    }

    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "Total time: {:.2}s",
            self.total_duration().as_secs_f64()
        );
        for (phase, duration) in &self.phase_durations {
            report.push_str(&format!("\n- {}: {:.3}s", phase, duration.as_secs_f64()));
        }
        report
    }
}

/// Runs the research pipeline for one query
pub async fn run_research<L, S>(context: &ResearchContext<L, S>, query: &str) -> Result<ResearchState>
where
    L: LanguageModel,
    S: SearchProvider,
{
    crate::generator::research::execute(context, query).await
}

/// Renders the final state and hands it to stdout and, when configured, to disk
pub async fn publish(config: &Config, state: &ResearchState) -> Result<()> {
    let report = outlet::render(state, config.output_format, config.target_language)?;

    ConsoleOutlet.save(&report).await?;
    if let Some(path) = &config.output_path {
        DiskOutlet::new(path).save(&report).await?;
    }
    Ok(())
}

/// 启动调研工作流
pub async fn launch(config: &Config, query: &str) -> Result<ResearchState> {
    let context = ResearchContext::new(config.clone())?;

    // 启动时检查模型连接
    context.llm.check_connection().await?;

    let state = run_research(&context, query).await?;
    publish(config, &state).await?;

    info!("✓ Done: {} tools analyzed", state.companies.len());
    Ok(state)
}

// Include tests
#[cfg(test)]
mod tests;
