use std::fs::OpenOptions;
use std::io;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use tsperf_core::prelude::{parse_bool_flag, Env};

use crate::report::{AzurePipelinesReporter, GithubActionsReporter, OutputReporter};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
pub struct GenerateMatrixCli {
    /// The preset to expand into a job matrix
    #[arg(long, required_unless_present = "list_presets")]
    pub preset: Option<String>,

    /// Run every suite in a single job on the baseline machine.
    ///
    /// Only a case-insensitive `true` enables baselining, any other value is treated as `false`.
    #[arg(
        long,
        env = "USE_BASELINE_MACHINE",
        default_value = "false",
        value_parser = parse_baselining,
        action = ArgAction::Set
    )]
    pub baselining: bool,

    /// The CI system to report output variables to
    #[arg(long, env = "TSPERF_CI", value_enum, default_value_t = CiProvider::Azure)]
    pub ci: CiProvider,

    /// Print the names of the known presets and exit
    #[arg(long, default_value = "false")]
    pub list_presets: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CiProvider {
    /// Logging commands on stdout
    Azure,
    /// Lines appended to the file named by `GITHUB_OUTPUT`
    Github,
}

impl CiProvider {
    /// Create the reporter for this CI system.
    pub fn reporter(self, env: &Env) -> anyhow::Result<Box<dyn OutputReporter>> {
        Ok(match self {
            CiProvider::Azure => Box::new(AzurePipelinesReporter::new(io::stdout())),
            CiProvider::Github => {
                let path = env.required("GITHUB_OUTPUT")?;
                let file = OpenOptions::new()
                    .append(true)
                    .create(true)
                    .open(path)
                    .with_context(|| format!("Failed to open GitHub output file '{path}'"))?;
                Box::new(GithubActionsReporter::new(file))
            }
        })
    }
}

fn parse_baselining(s: &str) -> Result<bool, std::convert::Infallible> {
    Ok(parse_bool_flag(s))
}
