use std::{io, path::PathBuf};

use anyhow::Result;

use crate::utils::{
    cluster::ClusterConfig,
    dump_file,
    external_prog::{DryRunLauncher, Launcher, MpiLauncher},
    journal::Journal,
    results_uploader::ResultHandler,
    runner::run_sweep,
    sampling::SourceSampling,
    sweep::SweepPlan,
};

pub mod diameter;
pub mod iterations;

/// Options every sweep shares, independent of the swept parameter.
#[derive(clap::Args, Debug)]
pub struct SweepArgs {
    /// Partitioning strategies, passed as `--graph_opts=ingress=<strategy>`
    #[arg(long = "strategy", default_values_t = [
        String::from("grid"),
        String::from("random"),
        String::from("oblivious"),
    ])]
    pub strategies: Vec<String>,

    /// How many times the whole grid is repeated
    #[arg(long, default_value_t = 3)]
    pub runs: usize,

    /// Print the invocations as JSON lines instead of launching them
    #[arg(long, action)]
    pub dry_run: bool,

    /// Leave the swept value off the toolkit's command line
    #[arg(long, action)]
    pub no_param_flag: bool,

    /// Do not write a CSV journal of the launched jobs
    #[arg(long, action)]
    pub no_journal: bool,

    /// File the toolkit appends its measurements to, handed to the result handler afterwards
    #[arg(long)]
    pub results_file: Option<PathBuf>,
}

/// Run a prepared sweep with the launcher and journal `args` ask for.
///
/// A dry run spawns nothing: no jobs, no `shuf`, no uploads.
pub fn execute(
    name: &str,
    plan: SweepPlan,
    cluster: ClusterConfig,
    mut sampling: Option<SourceSampling>,
    args: &SweepArgs,
    handler: Box<impl ResultHandler + ?Sized>,
) -> Result<()> {
    let mut launcher: Box<dyn Launcher> = if args.dry_run {
        sampling = sampling.map(SourceSampling::without_spawning);
        Box::new(DryRunLauncher::new(io::stdout()))
    } else {
        Box::new(MpiLauncher::new())
    };

    let mut journal = if args.dry_run || args.no_journal {
        None
    } else {
        let journal = Journal::create(dump_file(&format!("sweep_{}", name), "csv"))?;
        info!("jobs will be journaled to {}", journal.path().display());
        Some(journal)
    };

    let summary = run_sweep(
        &plan,
        &cluster,
        sampling.as_mut(),
        launcher.as_mut(),
        journal.as_mut(),
    )?;
    info!("sweep finished, {} jobs completed", summary.invocations);

    if args.dry_run {
        return Ok(());
    }

    /* process results */
    if let Some(journal) = journal {
        handler.handle_result(journal.path());
    }
    if let Some(results) = &args.results_file {
        handler.handle_result(results);
    }

    Ok(())
}
