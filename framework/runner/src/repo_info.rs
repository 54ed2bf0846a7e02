use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::{bail, Context};
use chrono::{DateTime, SecondsFormat, Utc};
use tsperf_core::prelude::Env;

use crate::types::RunnerResult;

/// Set by Azure Pipelines to the full ref that triggered the build, e.g. `refs/heads/main`.
const CI_SOURCE_BRANCH_ENV: &str = "BUILD_SOURCEBRANCH";

/// Where the benchmarked sources came from, recorded alongside saved results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    /// Commit date, RFC 3339 in UTC
    pub date: String,
    pub branch: String,
    pub commit: String,
    pub commit_short: String,
    /// Commit date as `YYYY/MM/DD`, used to group saved results
    pub timestamp_dir: String,
}

/// Looks up [`RepoInfo`] for a checkout.
pub trait RepoInfoProvider {
    fn repo_info(&self, dir: &Path) -> impl Future<Output = RunnerResult<RepoInfo>> + Send;
}

/// Reads [`RepoInfo`] by running `git` in the checkout.
#[derive(Debug, Clone, Default)]
pub struct GitRepoInfo {
    ci_branch: Option<String>,
}

impl GitRepoInfo {
    /// CI systems usually check out a detached `HEAD`, in which case the branch is taken from
    /// the CI variables in `env`.
    pub fn new(env: &Env) -> Self {
        Self {
            ci_branch: env
                .optional(CI_SOURCE_BRANCH_ENV)
                .map(|branch| branch.strip_prefix("refs/heads/").unwrap_or(branch).to_string()),
        }
    }
}

impl RepoInfoProvider for GitRepoInfo {
    async fn repo_info(&self, dir: &Path) -> RunnerResult<RepoInfo> {
        let log = git(dir, &["log", "-1", "--format=%H%n%h%n%cI"]).await?;

        let branch = match git(dir, &["rev-parse", "--abbrev-ref", "HEAD"]).await? {
            branch if branch == "HEAD" => self
                .ci_branch
                .clone()
                .context("Checkout is a detached HEAD and no CI branch is set")?,
            branch => branch,
        };

        let info = parse_commit_log(&log, branch)?;
        log::debug!("Repository info for {}: {info:?}", dir.display());
        Ok(info)
    }
}

async fn git(dir: &Path, args: &[&str]) -> RunnerResult<String> {
    let output = tokio::process::Command::new("git")
        .current_dir(dir)
        .args(args)
        .stderr(Stdio::inherit())
        .output()
        .await
        .with_context(|| format!("Failed to run 'git {}'", args.join(" ")))?;

    if !output.status.success() {
        bail!(
            "'git {}' failed with {status}",
            args.join(" "),
            status = output.status
        );
    }

    Ok(String::from_utf8(output.stdout)
        .context("Output of git was not valid UTF-8")?
        .trim()
        .to_string())
}

/// Parse the output of `git log -1 --format=%H%n%h%n%cI`.
fn parse_commit_log(log: &str, branch: String) -> RunnerResult<RepoInfo> {
    let mut lines = log.lines().map(str::trim);
    let (Some(commit), Some(commit_short), Some(date)) = (lines.next(), lines.next(), lines.next())
    else {
        bail!("Unexpected output from git log: {log:?}");
    };

    let date = DateTime::parse_from_rfc3339(date)
        .with_context(|| format!("Invalid commit date '{date}'"))?
        .with_timezone(&Utc);

    Ok(RepoInfo {
        date: date.to_rfc3339_opts(SecondsFormat::Secs, true),
        branch,
        commit: commit.to_string(),
        commit_short: commit_short.to_string(),
        timestamp_dir: date.format("%Y/%m/%d").to_string(),
    })
}

/// The directory repository info is read from.
pub(crate) fn repo_dir() -> RunnerResult<PathBuf> {
    std::env::current_dir().context("Failed to get the current directory")
}
