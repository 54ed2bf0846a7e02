use clap::{Args, Parser, Subcommand};
use tsperf_core::prelude::Suite;

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
pub struct TsperfRunnerCli {
    #[command(subcommand)]
    pub command: RunnerCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RunnerCommand {
    /// Install every host listed in the `TSPERF_*_HOSTS` variables
    InstallHosts,
    /// Benchmark the compiler, `tsc.js` in the built directory
    BenchmarkTsc(BenchmarkArgs),
    /// Benchmark the language server, `tsserver.js` in the built directory
    BenchmarkTsserver(BenchmarkArgs),
    /// Benchmark process startup for the built directory
    BenchmarkStartup(BenchmarkArgs),
}

impl RunnerCommand {
    /// The suite and arguments of a benchmark command, `None` for other commands.
    pub fn benchmark(&self) -> Option<(Suite, &BenchmarkArgs)> {
        match self {
            RunnerCommand::InstallHosts => None,
            RunnerCommand::BenchmarkTsc(args) => Some((Suite::Tsc, args)),
            RunnerCommand::BenchmarkTsserver(args) => Some((Suite::Tsserver, args)),
            RunnerCommand::BenchmarkStartup(args) => Some((Suite::Startup, args)),
        }
    }
}

/// Options shared by the benchmark commands.
///
/// Flag names match the benchmark tool's own so they can be passed along unchanged.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkArgs {
    /// The directory containing the built compiler
    #[arg(long = "builtDir")]
    pub built_dir: Option<String>,

    /// Save the results to this file
    #[arg(long)]
    pub save: Option<String>,

    /// Save the results to blob storage under this name
    #[arg(long = "saveBlob")]
    pub save_blob: Option<String>,

    /// Compare against the results in this file
    #[arg(long)]
    pub baseline: Option<String>,

    /// Load results from this file instead of running the benchmark
    #[arg(long)]
    pub load: Option<String>,

    /// Label for the baseline results
    #[arg(long = "baselineName")]
    pub baseline_name: Option<String>,

    /// Label for the new results
    #[arg(long = "benchmarkName")]
    pub benchmark_name: Option<String>,

    /// Output format for the comparison
    #[arg(long)]
    pub format: Option<String>,

    /// Only print the results
    #[arg(long, default_value = "false")]
    pub quiet: bool,
}

impl BenchmarkArgs {
    pub fn built_dir(&self) -> Option<&str> {
        non_empty(&self.built_dir)
    }

    pub fn save(&self) -> Option<&str> {
        non_empty(&self.save)
    }

    pub fn save_blob(&self) -> Option<&str> {
        non_empty(&self.save_blob)
    }
}

/// Flags given as `--flag ""` are treated as not given.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
