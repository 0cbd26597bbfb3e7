use serde::Serialize;

use super::{cluster::ClusterConfig, sweep::SweepPoint};

/// A fully formatted external process call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    pub fn build(cluster: &ClusterConfig, point: &SweepPoint, sources: &[String]) -> Invocation {
        // mpiexec -n <hosts> -hostfile <path> <binary> --graph=.. --format=.. --graph_opts=ingress=..
        let mut args = vec![
            "-n".to_string(),
            cluster.hosts.to_string(),
            "-hostfile".to_string(),
            cluster.hostfile.display().to_string(),
            cluster.algorithm_path(point.algorithm).display().to_string(),
            format!("--graph={}", cluster.graph.display()),
            format!("--format={}", cluster.format),
            cluster.graph_opts_flag(point.strategy),
        ];
        if point.param_flag {
            args.push(format!("--{}={}", point.param.flag(), point.value));
        }
        args.extend(sources.iter().map(|id| format!("--source={}", id)));

        let env = cluster
            .topologies_file
            .iter()
            .map(|path| ("TOPOLOGIES_FILE".to_string(), path.display().to_string()))
            .collect();

        Invocation {
            program: cluster.launcher.clone(),
            args,
            env,
        }
    }

    pub fn source_count(&self) -> usize {
        self.args
            .iter()
            .filter(|a| a.starts_with("--source="))
            .count()
    }

    /// shell-like rendering, for logs only
    pub fn command_line(&self) -> String {
        let mut line = String::new();
        for (key, value) in &self.env {
            line.push_str(&format!("{}={} ", key, value));
        }
        line.push_str(&self.program);
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::utils::sweep::{ParamKind, ParamValue};

    pub(crate) fn test_cluster() -> ClusterConfig {
        ClusterConfig {
            launcher: "mpiexec".to_string(),
            hosts: 16,
            hostfile: PathBuf::from("/home/exp/machines"),
            bin_dir: PathBuf::from("/home/exp/bin"),
            graph: PathBuf::from("/home/exp/graphs/livejournal/"),
            format: "snap".to_string(),
            graph_opts: vec![],
            topologies_file: None,
        }
    }

    #[test]
    fn test_tolerance_command_line() {
        let point = SweepPoint {
            run: 0,
            param: ParamKind::Tolerance,
            value: ParamValue::Float(0.0001),
            algorithm: "approximate_diameter",
            strategy: "oblivious",
            param_flag: true,
        };
        let inv = Invocation::build(&test_cluster(), &point, &[]);

        assert_eq!(inv.program, "mpiexec");
        assert_eq!(
            inv.args,
            vec![
                "-n",
                "16",
                "-hostfile",
                "/home/exp/machines",
                "/home/exp/bin/approximate_diameter",
                "--graph=/home/exp/graphs/livejournal/",
                "--format=snap",
                "--graph_opts=ingress=oblivious",
                "--tol=0.0001",
            ]
        );
        assert!(inv.env.is_empty());
        assert_eq!(inv.source_count(), 0);
    }

    #[test]
    fn test_sources_are_appended_in_order() {
        let point = SweepPoint {
            run: 2,
            param: ParamKind::Iterations,
            value: ParamValue::Int(10),
            algorithm: "sssp",
            strategy: "grid",
            param_flag: true,
        };
        let sources = vec!["17".to_string(), "4".to_string()];
        let inv = Invocation::build(&test_cluster(), &point, &sources);

        assert_eq!(inv.source_count(), 2);
        assert_eq!(
            &inv.args[inv.args.len() - 3..],
            &["--iterations=10", "--source=17", "--source=4"]
        );
    }

    #[test]
    fn test_sssp_gets_only_sources() {
        let point = SweepPoint {
            run: 0,
            param: ParamKind::Iterations,
            value: ParamValue::Int(2),
            algorithm: "sssp",
            strategy: "random",
            param_flag: false,
        };
        let sources = vec!["9".to_string(), "31".to_string()];
        let inv = Invocation::build(&test_cluster(), &point, &sources);

        assert!(inv.args.iter().all(|a| !a.starts_with("--iterations")));
        assert_eq!(
            &inv.args[inv.args.len() - 3..],
            &["--graph_opts=ingress=random", "--source=9", "--source=31"]
        );
    }

    #[test]
    fn test_topologies_file_goes_to_env() {
        let mut cluster = test_cluster();
        cluster.topologies_file = Some(PathBuf::from("/home/exp/topologies"));
        let point = SweepPoint {
            run: 0,
            param: ParamKind::Tolerance,
            value: ParamValue::Float(0.1),
            algorithm: "approximate_diameter",
            strategy: "grid",
            param_flag: true,
        };
        let inv = Invocation::build(&cluster, &point, &[]);

        assert_eq!(
            inv.env,
            vec![("TOPOLOGIES_FILE".to_string(), "/home/exp/topologies".to_string())]
        );
        assert!(inv
            .command_line()
            .starts_with("TOPOLOGIES_FILE=/home/exp/topologies mpiexec -n 16"));
    }
}
