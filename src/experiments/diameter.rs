//! Approximate diameter under varying convergence tolerance
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
pub struct DiameterArgs {
    /// Convergence tolerances, passed as `--tol`
    #[arg(long = "tolerance", default_values_t = [0.0001, 0.001, 0.01, 0.1])]
    tolerances: Vec<f64>,

    /// graph_analytics binaries to run
    #[arg(long = "algorithm", default_values_t = [String::from("approximate_diameter")])]
    algorithms: Vec<String>,

    #[command(flatten)]
    cluster: ClusterArgs,

    #[command(flatten)]
    sweep: SweepArgs,

    #[command(flatten)]
    sampling: SamplingArgs,
}

pub fn run(args: DiameterArgs, handler: Box<impl ResultHandler + ?Sized>) -> anyhow::Result<()> {
    let cluster = args.cluster.resolve()?;
    // a tolerance is never a sample size, sources come only from an explicit --sources
    let sampling = args.sampling.into_sampling(false, args.cluster.home())?;

    let plan = SweepPlan::new(
        args.sweep.runs,
        ParamAxis::tolerance(&args.tolerances),
        args.algorithms,
        args.sweep.strategies.clone(),
    )
    .with_param_flag(!args.sweep.no_param_flag);

    execute("diameter", plan, cluster, sampling, &args.sweep, handler)
}
