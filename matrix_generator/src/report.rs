use std::io::Write;

use anyhow::Context;
use tsperf_core::prelude::Suite;

use crate::matrix::JobMatrix;

/// Output variable holding the compact JSON job matrix.
pub const MATRIX_OUTPUT: &str = "MATRIX";

/// Output variable holding a suite's merge flag.
pub fn merge_output_name(suite: Suite) -> &'static str {
    match suite {
        Suite::Tsc => "TSPERF_MERGE_TSC",
        Suite::Tsserver => "TSPERF_MERGE_TSSERVER",
        Suite::Startup => "TSPERF_MERGE_STARTUP",
    }
}

/// Hands named values to the CI system that runs the generator so later stages can use them.
pub trait OutputReporter {
    fn set_output(&mut self, name: &str, value: &str) -> std::io::Result<()>;
}

/// Sets output variables with Azure Pipelines logging commands.
pub struct AzurePipelinesReporter<W> {
    writer: W,
}

impl<W: Write> AzurePipelinesReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputReporter for AzurePipelinesReporter<W> {
    fn set_output(&mut self, name: &str, value: &str) -> std::io::Result<()> {
        writeln!(
            self.writer,
            "##vso[task.setvariable variable={name};isOutput=true]{value}"
        )
    }
}

/// Sets step outputs as `name=value` lines, the format of the file in `GITHUB_OUTPUT`.
pub struct GithubActionsReporter<W> {
    writer: W,
}

impl<W: Write> GithubActionsReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputReporter for GithubActionsReporter<W> {
    fn set_output(&mut self, name: &str, value: &str) -> std::io::Result<()> {
        // Values are single line, compact JSON never contains a newline.
        writeln!(self.writer, "{name}={value}")
    }
}

/// Print the matrix for people reading the build log, then report it and the merge flags.
pub fn write_matrix<W, R>(matrix: &JobMatrix, mut out: W, reporter: &mut R) -> anyhow::Result<()>
where
    W: Write,
    R: OutputReporter + ?Sized,
{
    let pretty =
        serde_json::to_string_pretty(&matrix.jobs).context("Failed to serialize job matrix")?;
    writeln!(out, "{pretty}").context("Failed to print job matrix")?;
    out.flush()?;

    let compact = serde_json::to_string(&matrix.jobs).context("Failed to serialize job matrix")?;
    reporter
        .set_output(MATRIX_OUTPUT, &compact)
        .context("Failed to report job matrix")?;

    for suite in Suite::ALL {
        let name = merge_output_name(suite);
        reporter
            .set_output(name, &matrix.merge.get(suite).to_string())
            .with_context(|| format!("Failed to report '{name}'"))?;
    }

    Ok(())
}
