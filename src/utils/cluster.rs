use std::path::{Path, PathBuf};

use anyhow::Result;

use super::home_dir;

/// Where the toolkit lives and how it is spread over the cluster.
#[derive(clap::Args, Debug)]
pub struct ClusterArgs {
    /// Directory the default paths are derived from, defaults to $HOME
    #[arg(long)]
    home: Option<PathBuf>,

    /// Number of processes mpiexec should start
    #[arg(short = 'n', long, default_value_t = 16)]
    hosts: u32,

    /// Host file for process placement [default: <home>/machines]
    #[arg(long)]
    hostfile: Option<PathBuf>,

    /// Directory with the compiled graph_analytics binaries
    /// [default: <home>/PowerGraph/release/toolkits/graph_analytics]
    #[arg(long)]
    bin_dir: Option<PathBuf>,

    /// Graph location [default: <home>/graphs/livejournal/]
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Input format of the graph files
    #[arg(long, default_value_t = String::from("snap"))]
    format: String,

    /// Extra `key=value` graph options appended after the ingress method
    #[arg(long = "graph-opt")]
    graph_opts: Vec<String>,

    /// Topology description exported to the toolkit as TOPOLOGIES_FILE
    #[arg(long)]
    topologies_file: Option<PathBuf>,

    /// Job launcher used to start the toolkit
    #[arg(long, default_value_t = String::from("mpiexec"))]
    launcher: String,
}

impl ClusterArgs {
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn resolve(&self) -> Result<ClusterConfig> {
        let default_path = |given: &Option<PathBuf>, relative: &str| -> Result<PathBuf> {
            match given {
                Some(p) => Ok(p.clone()),
                None => Ok(home_dir(self.home())?.join(relative)),
            }
        };

        Ok(ClusterConfig {
            launcher: self.launcher.clone(),
            hosts: self.hosts,
            hostfile: default_path(&self.hostfile, "machines")?,
            bin_dir: default_path(&self.bin_dir, "PowerGraph/release/toolkits/graph_analytics")?,
            graph: default_path(&self.graph, "graphs/livejournal/")?,
            format: self.format.clone(),
            graph_opts: self.graph_opts.clone(),
            topologies_file: self.topologies_file.clone(),
        })
    }
}

/// Structural parameters shared by every invocation of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    pub launcher: String,
    pub hosts: u32,
    pub hostfile: PathBuf,
    pub bin_dir: PathBuf,
    pub graph: PathBuf,
    pub format: String,
    pub graph_opts: Vec<String>,
    pub topologies_file: Option<PathBuf>,
}

impl ClusterConfig {
    pub fn algorithm_path(&self, algorithm: &str) -> PathBuf {
        self.bin_dir.join(algorithm)
    }

    /// `--graph_opts=ingress=<strategy>[,extra...]`
    pub fn graph_opts_flag(&self, strategy: &str) -> String {
        let mut opts = format!("--graph_opts=ingress={}", strategy);
        for opt in &self.graph_opts {
            opts.push(',');
            opts.push_str(opt);
        }
        opts
    }
}
