use std::io::Write;

use anyhow::Context;
use subprocess::{Exec, Redirection};

use super::invocation::Invocation;

pub trait Launcher {
    /// Run the invocation to completion. Anything but a clean exit is an error.
    fn launch(&mut self, invocation: &Invocation) -> anyhow::Result<()>;
}

/// Starts the job launcher and blocks until the distributed job is done.
/// The child's stderr is merged into its stdout, which is inherited from us.
pub struct MpiLauncher {}

impl MpiLauncher {
    pub fn new() -> MpiLauncher {
        MpiLauncher {}
    }
}

impl Launcher for MpiLauncher {
    fn launch(&mut self, invocation: &Invocation) -> anyhow::Result<()> {
        let mut exec = Exec::cmd(&invocation.program)
            .args(invocation.args.as_slice())
            .stderr(Redirection::Merge);
        for (key, value) in &invocation.env {
            exec = exec.env(key, value);
        }

        let status = exec
            .join()
            .with_context(|| format!("failed to start '{}'", invocation.program))?;

        if status.success() {
            Ok(())
        } else {
            Err(anyhow::format_err!(
                "{} process exited with exit code {:?}",
                invocation.program,
                status
            ))
        }
    }
}

/// Prints every invocation as a JSON line instead of running it.
pub struct DryRunLauncher<W: Write> {
    out: W,
}

impl<W: Write> DryRunLauncher<W> {
    pub fn new(out: W) -> Self {
        DryRunLauncher { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Launcher for DryRunLauncher<W> {
    fn launch(&mut self, invocation: &Invocation) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, invocation)?;
        writeln!(self.out)?;
        Ok(())
    }
}
