#[macro_use]
extern crate log;

use clap::Parser;
use log::Level;
use utils::results_uploader::handler_for;

mod experiments;
mod utils;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Upload the journal and results file to this URL (curl -T) after a successful sweep
    #[clap(long)]
    push_results_url: Option<String>,

    /// Log debug messages, including the full command lines
    #[arg(short, long, action)]
    verbose: bool,

    #[command(subcommand)]
    experiment: Experiments,
}

#[derive(clap::Subcommand, Debug)]
enum Experiments {
    /// Approximate diameter over a grid of tolerances
    ///
    /// Runs the approximate_diameter toolkit for every tolerance and
    /// partitioning strategy, repeating the whole grid --runs times.
    Diameter(experiments::diameter::DiameterArgs),

    /// Iterative algorithms over a grid of iteration counts
    ///
    /// Runs pagerank (or any other graph_analytics binary taking --iterations)
    /// for every iteration count and partitioning strategy. With
    /// --sources-per-iteration every job also gets that many random --source
    /// vertices, which is how the sssp sweeps are done.
    Iterations(experiments::iterations::IterationsArgs),
}

fn main() -> anyhow::Result<()> {
    // parse command line arguments
    let args = Args::parse();

    // init logging
    let level = if args.verbose { Level::Debug } else { Level::Info };
    simple_logger::init_with_level(level)?;

    // results handler
    let handler = handler_for(args.push_results_url);

    match args.experiment {
        Experiments::Diameter(ev) => experiments::diameter::run(ev, handler)?,
        Experiments::Iterations(ev) => experiments::iterations::run(ev, handler)?,
    };

    Ok(())
}
