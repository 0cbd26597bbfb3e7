use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use rand::{rngs::StdRng, seq::index, SeedableRng};
use subprocess::{Exec, Redirection};

use super::{home_dir, sweep::SweepPoint};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplerKind {
    /// Draw lines with the `shuf` utility
    Shuf,
    /// Draw lines in-process, reproducible with --seed
    Builtin,
}

#[derive(clap::Args, Debug)]
pub struct SamplingArgs {
    /// Tab separated file the source vertices are drawn from, the first field is the vertex id
    /// [default: <home>/lab_data_lj]
    #[arg(long)]
    source_file: Option<PathBuf>,

    /// Number of random source vertices passed to every invocation
    #[arg(long)]
    sources: Option<usize>,

    /// How the source vertices are drawn
    #[arg(long, value_enum, default_value_t = SamplerKind::Shuf)]
    sampler: SamplerKind,

    /// Seed for the builtin sampler
    #[arg(long)]
    seed: Option<u64>,
}

impl SamplingArgs {
    /// `count_from_value` makes every point draw as many sources as its parameter value.
    pub fn into_sampling(
        self,
        count_from_value: bool,
        home: Option<&Path>,
    ) -> Result<Option<SourceSampling>> {
        let count = match (count_from_value, self.sources) {
            (true, _) => SampleCount::FromValue,
            (false, Some(k)) => SampleCount::Fixed(k),
            (false, None) => return Ok(None),
        };

        let file = match self.source_file {
            Some(f) => f,
            None => home_dir(home)?.join("lab_data_lj"),
        };

        let sampler: Box<dyn SourceSampler> = match self.sampler {
            SamplerKind::Shuf => Box::new(ShufSampler::new(file)),
            SamplerKind::Builtin => Box::new(BuiltinSampler::open(&file, self.seed)?),
        };

        Ok(Some(SourceSampling { count, sampler }))
    }
}

pub trait SourceSampler {
    /// Draw up to `count` distinct vertex ids.
    fn sample(&mut self, count: usize) -> Result<Vec<String>>;

    /// true when drawing a sample starts an external program
    fn spawns_process(&self) -> bool {
        false
    }
}

/// First tab separated field of every non-empty line.
pub fn source_ids<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.split_once('\t').map_or(l, |(id, _)| id).to_string())
        .collect()
}

pub fn parse_sources(output: &str) -> Vec<String> {
    source_ids(output.split('\n'))
}

pub struct ShufSampler {
    file: PathBuf,
}

impl ShufSampler {
    pub fn new(file: PathBuf) -> Self {
        Self { file }
    }
}

impl SourceSampler for ShufSampler {
    fn sample(&mut self, count: usize) -> Result<Vec<String>> {
        let capture = Exec::cmd("shuf")
            .arg("-n")
            .arg(count.to_string())
            .arg(&self.file)
            .stdout(Redirection::Pipe)
            .capture()
            .with_context(|| format!("failed to run shuf on '{}'", self.file.display()))?;

        if !capture.success() {
            bail!(
                "shuf exited with exit code {:?} while sampling '{}'",
                capture.exit_status,
                self.file.display()
            );
        }

        Ok(parse_sources(&capture.stdout_str()))
    }

    fn spawns_process(&self) -> bool {
        true
    }
}

/// Stands in for a process-backed sampler during dry runs: `count` numbered
/// markers instead of vertex ids.
pub struct PlaceholderSampler {}

impl SourceSampler for PlaceholderSampler {
    fn sample(&mut self, count: usize) -> Result<Vec<String>> {
        Ok((1..=count).map(|i| format!("<sample-{}>", i)).collect())
    }
}

/// In-process equivalent of `shuf -n`: distinct lines in random order.
pub struct BuiltinSampler {
    lines: Vec<String>,
    rng: StdRng,
}

impl BuiltinSampler {
    pub fn open(file: &Path, seed: Option<u64>) -> Result<Self> {
        let contents = fs::read_to_string(file)
            .with_context(|| format!("failed to read source file '{}'", file.display()))?;
        Ok(Self::from_lines(
            contents.lines().map(String::from).collect(),
            seed,
        ))
    }

    pub fn from_lines(lines: Vec<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        BuiltinSampler { lines, rng }
    }
}

impl SourceSampler for BuiltinSampler {
    fn sample(&mut self, count: usize) -> Result<Vec<String>> {
        // like shuf, asking for more lines than there are returns all of them
        let amount = count.min(self.lines.len());
        let picked = index::sample(&mut self.rng, self.lines.len(), amount);
        Ok(source_ids(picked.iter().map(|i| self.lines[i].as_str())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleCount {
    Fixed(usize),
    /// use the sweep point's integer parameter as the sample size
    FromValue,
}

pub struct SourceSampling {
    pub count: SampleCount,
    pub sampler: Box<dyn SourceSampler>,
}

impl SourceSampling {
    pub fn draw(&mut self, point: &SweepPoint) -> Result<Vec<String>> {
        let count = match self.count {
            SampleCount::Fixed(k) => k,
            SampleCount::FromValue => point.value.as_count().with_context(|| {
                format!("{} value {} is not a sample size", point.param.name(), point.value)
            })?,
        };
        self.sampler.sample(count)
    }

    /// Same sample sizes, but nothing is ever spawned.
    pub fn without_spawning(self) -> SourceSampling {
        if self.sampler.spawns_process() {
            SourceSampling {
                count: self.count,
                sampler: Box::new(PlaceholderSampler {}),
            }
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::utils::sweep::{ParamKind, ParamValue};

    fn lab_lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}\t{}", i * 7, i % 3)).collect()
    }

    #[test]
    fn test_parse_takes_first_field_of_nonempty_lines() {
        let out = "12\t0.5\n\n7\t1.25\n3\n";
        assert_eq!(parse_sources(out), vec!["12", "7", "3"]);
        assert!(parse_sources("").is_empty());
    }

    #[test]
    fn test_failing_shuf_is_an_error() {
        let mut sampler = ShufSampler::new(PathBuf::from("/nonexistent/lab_data_lj"));
        assert!(sampler.sample(5).is_err());
    }

    #[test]
    fn test_dry_sampling_never_spawns() {
        let sampling = SourceSampling {
            count: SampleCount::Fixed(3),
            sampler: Box::new(ShufSampler::new(PathBuf::from("/nonexistent/lab_data_lj"))),
        };
        let mut sampling = sampling.without_spawning();
        assert!(!sampling.sampler.spawns_process());

        let point = SweepPoint {
            run: 0,
            param: ParamKind::Iterations,
            value: ParamValue::Int(5),
            algorithm: "sssp",
            strategy: "grid",
            param_flag: false,
        };
        assert_eq!(
            sampling.draw(&point).unwrap(),
            vec!["<sample-1>", "<sample-2>", "<sample-3>"]
        );

        let builtin = SourceSampling {
            count: SampleCount::Fixed(2),
            sampler: Box::new(BuiltinSampler::from_lines(lab_lines(10), Some(9))),
        };
        let mut builtin = builtin.without_spawning();
        assert_eq!(builtin.draw(&point).unwrap().len(), 2);
    }

    #[test]
    fn test_builtin_draws_without_replacement() {
        let mut sampler = BuiltinSampler::from_lines(lab_lines(50), Some(1));
        let drawn = sampler.sample(20).unwrap();
        assert_eq!(drawn.len(), 20);

        let distinct: HashSet<&String> = drawn.iter().collect();
        assert_eq!(distinct.len(), 20);
        assert!(drawn.iter().all(|id| id.parse::<usize>().unwrap() % 7 == 0));
    }

    #[test]
    fn test_builtin_is_reproducible_with_seed() {
        let mut a = BuiltinSampler::from_lines(lab_lines(100), Some(42));
        let mut b = BuiltinSampler::from_lines(lab_lines(100), Some(42));
        assert_eq!(a.sample(10).unwrap(), b.sample(10).unwrap());
    }

    #[test]
    fn test_builtin_caps_at_file_size() {
        let mut sampler = BuiltinSampler::from_lines(lab_lines(3), Some(0));
        assert_eq!(sampler.sample(10).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_lines_are_not_sources() {
        let lines = vec!["1\ta".to_string(), String::new(), "2\tb".to_string()];
        let mut sampler = BuiltinSampler::from_lines(lines, Some(3));
        let drawn = sampler.sample(3).unwrap();
        assert_eq!(drawn.len(), 2);
    }

    #[test]
    fn test_count_from_value_needs_integer() {
        let mut sampling = SourceSampling {
            count: SampleCount::FromValue,
            sampler: Box::new(BuiltinSampler::from_lines(lab_lines(30), Some(5))),
        };

        let point = SweepPoint {
            run: 0,
            param: ParamKind::Iterations,
            value: ParamValue::Int(5),
            algorithm: "sssp",
            strategy: "grid",
            param_flag: true,
        };
        assert_eq!(sampling.draw(&point).unwrap().len(), 5);

        let point = SweepPoint {
            param: ParamKind::Tolerance,
            value: ParamValue::Float(0.01),
            ..point
        };
        assert!(sampling.draw(&point).is_err());
    }
}
