mod cli;
mod flags;
mod init;
mod invocation;
mod params;
mod repo_info;
mod run;
mod tool_path;
mod types;

pub mod prelude {
    pub use crate::cli::{BenchmarkArgs, RunnerCommand, TsperfRunnerCli};
    pub use crate::flags::create_flags;
    pub use crate::init::init;
    pub use crate::invocation::{Invocation, ToolExitError};
    pub use crate::params::{BenchmarkParameters, CompareOptions, Persistence, SaveTarget};
    pub use crate::repo_info::{GitRepoInfo, RepoInfo, RepoInfoProvider};
    pub use crate::run::{build_invocation, run};
    pub use crate::tool_path::{tsperf_exe, TSPERF_EXE_ENV};
    pub use crate::types::RunnerResult;
}
