use std::fmt;

/// Which numeric knob of the toolkit an axis drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Tolerance,
    Iterations,
}

impl ParamKind {
    /// name of the command line flag understood by the graph_analytics binaries
    pub fn flag(&self) -> &'static str {
        match self {
            ParamKind::Tolerance => "tol",
            ParamKind::Iterations => "iterations",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Tolerance => "tolerance",
            ParamKind::Iterations => "iterations",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Float(f64),
    Int(u64),
}

impl ParamValue {
    /// Interpret the value as a number of sources to sample. Only integer values qualify.
    pub fn as_count(&self) -> Option<usize> {
        match *self {
            ParamValue::Int(n) => usize::try_from(n).ok(),
            ParamValue::Float(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamAxis {
    kind: ParamKind,
    values: Vec<ParamValue>,
}

impl ParamAxis {
    pub fn tolerance(values: &[f64]) -> Self {
        ParamAxis {
            kind: ParamKind::Tolerance,
            values: values.iter().copied().map(ParamValue::Float).collect(),
        }
    }

    pub fn iterations(values: &[u64]) -> Self {
        ParamAxis {
            kind: ParamKind::Iterations,
            values: values.iter().copied().map(ParamValue::Int).collect(),
        }
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn values(&self) -> &[ParamValue] {
        &self.values
    }
}

/// One element of the grid. Lives only for the duration of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint<'a> {
    pub run: usize,
    pub param: ParamKind,
    pub value: ParamValue,
    pub algorithm: &'a str,
    pub strategy: &'a str,
    /// whether the value goes on the command line as `--<flag>=<value>`
    pub param_flag: bool,
}

impl fmt::Display for SweepPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "algorithm: {}, partitioning_strategy: {}, {}: {}",
            self.algorithm,
            self.strategy,
            self.param.name(),
            self.value
        )
    }
}

/// The full experiment grid: `runs` passes over value x algorithm x strategy.
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub runs: usize,
    pub axis: ParamAxis,
    pub algorithms: Vec<String>,
    pub strategies: Vec<String>,
    pub param_flag: bool,
}

impl SweepPlan {
    pub fn new(
        runs: usize,
        axis: ParamAxis,
        algorithms: Vec<String>,
        strategies: Vec<String>,
    ) -> Self {
        SweepPlan {
            runs,
            axis,
            algorithms,
            strategies,
            param_flag: true,
        }
    }

    /// Keep the swept value off the command line. Toolkits like sssp reject
    /// options they do not know, there the value only sizes the source sample.
    pub fn with_param_flag(mut self, param_flag: bool) -> Self {
        self.param_flag = param_flag;
        self
    }

    /// number of invocations a complete sweep performs, saturating at `usize::MAX`
    pub fn len(&self) -> usize {
        [
            self.axis.values.len(),
            self.algorithms.len(),
            self.strategies.len(),
        ]
        .iter()
        .fold(self.runs, |acc, &n| acc.saturating_mul(n))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Points in execution order, the strategy varies fastest.
    pub fn points(&self) -> impl Iterator<Item = SweepPoint<'_>> + '_ {
        let param = self.axis.kind;
        let param_flag = self.param_flag;
        (0..self.runs).flat_map(move |run| {
            self.axis.values.iter().flat_map(move |&value| {
                self.algorithms.iter().flat_map(move |algorithm| {
                    self.strategies.iter().map(move |strategy| SweepPoint {
                        run,
                        param,
                        value,
                        algorithm,
                        strategy,
                        param_flag,
                    })
                })
            })
        })
    }
}
