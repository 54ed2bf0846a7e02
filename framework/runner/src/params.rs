use std::path::{Path, PathBuf};

use anyhow::Context;
use tsperf_core::prelude::{Env, Suite};

use crate::cli::{non_empty, BenchmarkArgs};
use crate::flags::create_flags;
use crate::repo_info::{RepoInfo, RepoInfoProvider};
use crate::types::RunnerResult;

pub const SCENARIO_CONFIG_DIR_ENV: &str = "TSPERF_INTERNAL_SCENARIO_CONFIG_DIR";
pub const BENCHMARK_CPU_ENV: &str = "TSPERF_AGENT_BENCHMARK_CPU";
pub const STORAGE_CONNECTION_STRING_ENV: &str = "TSPERF_AZURE_STORAGE_CONNECTION_STRING";
pub const BLOB_LATEST_ENV: &str = "TSPERF_BLOB_LATEST";

const REPOSITORY_TYPE: &str = "git";
const REPOSITORY_URL: &str = "https://github.com/microsoft/TypeScript";

/// Where results are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    /// `--save`, a local file
    Local(PathBuf),
    /// `--saveBlob`, a name in blob storage
    Blob(String),
}

impl SaveTarget {
    /// A local file wins if both targets are given.
    pub fn from_args(args: &BenchmarkArgs) -> Option<Self> {
        match (args.save(), args.save_blob()) {
            (Some(path), blob) => {
                if let Some(blob) = blob {
                    log::warn!("Both --save and --saveBlob given, ignoring --saveBlob {blob}");
                }
                Some(SaveTarget::Local(PathBuf::from(path)))
            }
            (None, Some(blob)) => Some(SaveTarget::Blob(blob.to_string())),
            (None, None) => None,
        }
    }
}

/// What the benchmark tool does with the results of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    /// Record results, with the job's configuration and provenance, in a local file.
    Local {
        path: PathBuf,
        hosts: String,
        scenarios: String,
        iterations: String,
        cpus: String,
        repo: RepoInfo,
    },
    /// Upload results to blob storage under each of `names`.
    Blob { names: Vec<String> },
    /// Nothing is saved, results are printed and optionally compared.
    Compare(CompareOptions),
}

/// Options passed through to the benchmark tool when results are not saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareOptions {
    pub baseline: Option<String>,
    pub load: Option<String>,
    pub baseline_name: Option<String>,
    pub benchmark_name: Option<String>,
    pub format: Option<String>,
    pub quiet: bool,
}

impl CompareOptions {
    fn from_args(args: &BenchmarkArgs) -> Self {
        let owned = |value: &Option<String>| non_empty(value).map(str::to_string);
        Self {
            baseline: owned(&args.baseline),
            load: owned(&args.load),
            baseline_name: owned(&args.baseline_name),
            benchmark_name: owned(&args.benchmark_name),
            format: owned(&args.format),
            quiet: args.quiet,
        }
    }
}

/// The parameters common to every benchmark command, validated up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkParameters {
    pub scenario_config_dir: Option<String>,
    pub persistence: Persistence,
}

impl BenchmarkParameters {
    /// Gather the parameters for running `suite` from the command line and the job environment.
    ///
    /// When saving locally the destination directory is created. Repository info is only looked
    /// up when results are saved.
    pub async fn collect<P>(
        suite: Suite,
        args: &BenchmarkArgs,
        env: &Env,
        provider: &P,
        repo_dir: &Path,
    ) -> RunnerResult<Self>
    where
        P: RepoInfoProvider,
    {
        let scenario_config_dir = env.optional(SCENARIO_CONFIG_DIR_ENV).map(str::to_string);

        let persistence = match SaveTarget::from_args(args) {
            Some(SaveTarget::Local(path)) => {
                let hosts = env.required(suite.hosts_var())?.to_string();
                let scenarios = env.required(suite.scenarios_var())?.to_string();
                let iterations = env.required(suite.iterations_var())?.to_string();
                let cpus = env.required(BENCHMARK_CPU_ENV)?.to_string();

                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.with_context(|| {
                        format!("Failed to create directory {}", parent.display())
                    })?;
                }

                let repo = provider.repo_info(repo_dir).await?;

                Persistence::Local {
                    path,
                    hosts,
                    scenarios,
                    iterations,
                    cpus,
                    repo,
                }
            }
            Some(SaveTarget::Blob(name)) => {
                let repo = provider.repo_info(repo_dir).await?;
                // Only the benchmark tool uses it, but fail before running a benchmark whose
                // results could not be uploaded.
                env.required(STORAGE_CONNECTION_STRING_ENV)?;

                let mut names = vec![format!(
                    "{}/{}/{}.{name}.benchmark",
                    repo.branch, repo.timestamp_dir, repo.commit_short
                )];
                if env.flag(BLOB_LATEST_ENV) {
                    names.push(format!("{}/latest.{name}.benchmark", repo.branch));
                }

                Persistence::Blob { names }
            }
            None => Persistence::Compare(CompareOptions::from_args(args)),
        };

        Ok(Self {
            scenario_config_dir,
            persistence,
        })
    }

    /// Arguments for the benchmark tool, in the order they are passed.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(dir) = &self.scenario_config_dir {
            push_flag(&mut args, "scenarioConfigDir", dir);
        }

        match &self.persistence {
            Persistence::Local {
                path,
                hosts,
                scenarios,
                iterations,
                cpus,
                repo,
            } => {
                push_flag(&mut args, "save", &path.to_string_lossy());
                args.extend(create_flags("host", [hosts.as_str()]));
                args.extend(create_flags("scenario", [scenarios.as_str()]));
                push_flag(&mut args, "iterations", iterations);
                push_flag(&mut args, "cpus", cpus);
                push_flag(&mut args, "date", &repo.date);
                push_flag(&mut args, "repositoryType", REPOSITORY_TYPE);
                push_flag(&mut args, "repositoryUrl", REPOSITORY_URL);
                push_flag(&mut args, "repositoryBranch", &repo.branch);
                push_flag(&mut args, "repositoryCommit", &repo.commit);
                push_flag(&mut args, "repositoryDate", &repo.date);
            }
            Persistence::Blob { names } => {
                for name in names {
                    push_flag(&mut args, "saveBlob", name);
                }
            }
            Persistence::Compare(options) => {
                let optional = [
                    ("baseline", &options.baseline),
                    ("load", &options.load),
                    ("baselineName", &options.baseline_name),
                    ("benchmarkName", &options.benchmark_name),
                    ("format", &options.format),
                ];
                for (flag, value) in optional {
                    if let Some(value) = value {
                        push_flag(&mut args, flag, value);
                    }
                }
                if options.quiet {
                    args.push("--quiet".to_string());
                }
            }
        }

        args
    }
}

fn push_flag(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(format!("--{flag}"));
    args.push(value.to_string());
}
