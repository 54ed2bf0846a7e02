use std::fmt;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use anyhow::Context;

use crate::types::RunnerResult;

/// Returned when the benchmark tool runs but does not succeed.
#[derive(derive_more::Error, derive_more::Display, Debug)]
#[display("Benchmark tool failed with {status}")]
pub struct ToolExitError {
    status: ExitStatus,
}

impl ToolExitError {
    /// The tool's exit code, `None` if it was killed by a signal.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// A single run of the benchmark tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the tool and wait for it to exit.
    ///
    /// The tool shares this process's stdin, stdout and stderr so its output appears as it is
    /// written.
    pub async fn execute(&self) -> RunnerResult<()> {
        log::info!("Running {self}");

        let mut child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.program.display()))?;

        log::debug!("Benchmark tool running with PID: {:?}", child.id());

        let status = child
            .wait()
            .await
            .context("Failed to wait for the benchmark tool")?;

        log::debug!("Benchmark tool finished with status: {status}");
        if status.success() {
            Ok(())
        } else {
            Err(ToolExitError { status }.into())
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
