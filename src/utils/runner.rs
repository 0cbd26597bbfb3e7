use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;

use super::{
    cluster::ClusterConfig, external_prog::Launcher, invocation::Invocation, journal::Journal,
    sampling::SourceSampling, sweep::SweepPlan,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    pub invocations: usize,
}

/// Launch one job per sweep point, strictly one after another.
///
/// Sources are drawn fresh for every point. The first failing job (or sampler)
/// ends the sweep, nothing after it is attempted.
pub fn run_sweep(
    plan: &SweepPlan,
    cluster: &ClusterConfig,
    mut sampling: Option<&mut SourceSampling>,
    launcher: &mut dyn Launcher,
    mut journal: Option<&mut Journal>,
) -> Result<SweepSummary> {
    info!(
        "sweeping {} invocations ({} runs over {} {} values, {} algorithms, {} strategies)",
        plan.len(),
        plan.runs,
        plan.axis.values().len(),
        plan.axis.kind().name(),
        plan.algorithms.len(),
        plan.strategies.len()
    );

    if plan.is_empty() {
        warn!("one of the sweep axes is empty, nothing to launch");
    }

    let mut invocations = 0;
    for point in plan.points() {
        let sources = match sampling.as_mut() {
            Some(s) => s
                .draw(&point)
                .with_context(|| format!("sampling sources failed for {}", point))?,
            None => Vec::new(),
        };
        let invocation = Invocation::build(cluster, &point, &sources);

        info!("[run {}] {}", point.run, point);
        debug!("$ {}", invocation.command_line());

        let started = Local::now();
        let clock = Instant::now();
        let result = launcher.launch(&invocation);

        if let Some(j) = journal.as_mut() {
            j.record(&point, invocation.source_count(), started, clock.elapsed(), result.is_ok())?;
        }
        if let Err(e) = &result {
            error!("{} failed: {}", point, e);
        }
        result.with_context(|| format!("sweep aborted at run {}, {}", point.run, point))?;

        invocations += 1;
        debug!("  [OK] {}/{} done in {:?}", invocations, plan.len(), clock.elapsed());
    }

    Ok(SweepSummary { invocations })
}
