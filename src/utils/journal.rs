use std::{
    fs::File,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Result;
use chrono::{DateTime, Local};
use csv::{Writer, WriterBuilder};
use serde::Serialize;

use super::sweep::SweepPoint;

#[derive(Debug, Serialize)]
struct JournalRow<'a> {
    run: usize,
    algorithm: &'a str,
    strategy: &'a str,
    parameter: &'static str,
    value: String,
    sources: usize,
    started: String,
    elapsed_ms: u64,
    success: bool,
}

/// CSV record of every invocation of a sweep, one row per launched job.
pub struct Journal {
    path: PathBuf,
    output: Writer<File>,
}

impl Journal {
    pub fn create(path: impl AsRef<Path>) -> Result<Journal> {
        let path = path.as_ref().to_path_buf();
        let output = WriterBuilder::new().from_path(&path)?;
        Ok(Journal { path, output })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(
        &mut self,
        point: &SweepPoint,
        sources: usize,
        started: DateTime<Local>,
        elapsed: Duration,
        success: bool,
    ) -> Result<()> {
        self.output.serialize(JournalRow {
            run: point.run,
            algorithm: point.algorithm,
            strategy: point.strategy,
            parameter: point.param.name(),
            value: point.value.to_string(),
            sources,
            started: started.to_rfc3339(),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            success,
        })?;
        // a failed job aborts the sweep, the row has to be on disk by then
        self.output.flush()?;
        Ok(())
    }
}
