use std::path::{Path, PathBuf};

use tsperf_core::prelude::{ConfigError, Env, Suite};

use crate::cli::RunnerCommand;
use crate::flags::create_flags;
use crate::invocation::Invocation;
use crate::params::BenchmarkParameters;
use crate::repo_info::{repo_dir, GitRepoInfo, RepoInfoProvider};
use crate::tool_path::tsperf_exe;
use crate::types::RunnerResult;

/// Run `command` with the job configuration in `env`.
///
/// The benchmark tool must be configured before anything else happens. Fails if the tool
/// cannot be run or exits unsuccessfully, see [`crate::invocation::ToolExitError`].
pub async fn run(command: RunnerCommand, env: &Env) -> RunnerResult<()> {
    let exe = tsperf_exe(env)?;

    let invocation =
        build_invocation(&command, exe, env, &GitRepoInfo::new(env), &repo_dir()?).await?;

    invocation.execute().await
}

/// Assemble the benchmark tool invocation for `command` without running it.
pub async fn build_invocation<P>(
    command: &RunnerCommand,
    exe: PathBuf,
    env: &Env,
    provider: &P,
    repo_dir: &Path,
) -> RunnerResult<Invocation>
where
    P: RepoInfoProvider,
{
    let Some((suite, args)) = command.benchmark() else {
        let hosts = Suite::ALL
            .iter()
            .filter_map(|suite| env.optional(suite.hosts_var()))
            .collect::<Vec<_>>();
        if hosts.is_empty() {
            log::warn!("No hosts configured for any suite");
        }

        return Ok(Invocation::new(exe)
            .args(["host", "install"])
            .args(create_flags("host", hosts)));
    };

    let built_dir = args
        .built_dir()
        .ok_or_else(|| ConfigError::MissingFlag("builtDir".to_string()))?;
    let (flag, target) = benchmark_target(suite, Path::new(built_dir))?;

    let parameters = BenchmarkParameters::collect(suite, args, env, provider, repo_dir).await?;

    Ok(Invocation::new(exe)
        .args(["benchmark", suite.name()])
        .arg(format!("--{flag}"))
        .arg(target.to_string_lossy())
        .args(parameters.to_args()))
}

/// The flag and path that tell the benchmark tool what to run for `suite`.
fn benchmark_target(suite: Suite, built_dir: &Path) -> Result<(&'static str, PathBuf), ConfigError> {
    let (flag, target) = match suite {
        Suite::Tsc => ("tsc", built_dir.join("tsc.js")),
        Suite::Tsserver => ("tsserver", built_dir.join("tsserver.js")),
        Suite::Startup => ("builtDir", built_dir.to_path_buf()),
    };

    if !target.exists() {
        return Err(ConfigError::MissingArtifact(target.display().to_string()));
    }

    Ok((flag, target))
}
