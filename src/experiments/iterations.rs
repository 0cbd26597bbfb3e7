//! Fixed iteration count sweeps (pagerank, or sssp with random sources)
//!
use clap::Parser;

use crate::utils::{
    cluster::ClusterArgs,
    results_uploader::ResultHandler,
    sampling::SamplingArgs,
    sweep::{ParamAxis, SweepPlan},
};

use super::{execute, SweepArgs};

#[derive(Parser, Debug)]
pub struct IterationsArgs {
    /// Iteration counts, passed as `--iterations`
    #[arg(long = "iterations", default_values_t = [5, 10, 20])]
    iterations: Vec<u64>,

    /// graph_analytics binaries to run
    #[arg(long = "algorithm", default_values_t = [String::from("pagerank")])]
    algorithms: Vec<String>,

    /// Draw as many random sources as the iteration count for every job.
    /// Implies --no-param-flag, sssp takes no --iterations option
    #[arg(long, action, conflicts_with = "sources")]
    sources_per_iteration: bool,

    #[command(flatten)]
    cluster: ClusterArgs,

    #[command(flatten)]
    sweep: SweepArgs,

    #[command(flatten)]
    sampling: SamplingArgs,
}

fn sweep_plan(args: &IterationsArgs) -> SweepPlan {
    SweepPlan::new(
        args.sweep.runs,
        ParamAxis::iterations(&args.iterations),
        args.algorithms.clone(),
        args.sweep.strategies.clone(),
    )
    .with_param_flag(!(args.sweep.no_param_flag || args.sources_per_iteration))
}

pub fn run(args: IterationsArgs, handler: Box<impl ResultHandler + ?Sized>) -> anyhow::Result<()> {
    let plan = sweep_plan(&args);
    let cluster = args.cluster.resolve()?;
    let sampling = args
        .sampling
        .into_sampling(args.sources_per_iteration, args.cluster.home())?;

    execute("iterations", plan, cluster, sampling, &args.sweep, handler)
}
