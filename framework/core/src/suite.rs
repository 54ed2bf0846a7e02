use std::fmt;

/// A benchmark suite.
///
/// The suite decides the names of the environment variables that carry a job's parameters from
/// the matrix generator to the runner, so both sides must derive them from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suite {
    /// Compile-time benchmarks.
    Tsc,
    /// Language-server benchmarks.
    Tsserver,
    /// Process startup benchmarks.
    Startup,
}

impl Suite {
    /// Every suite, in the order they are reported.
    pub const ALL: [Suite; 3] = [Suite::Tsc, Suite::Tsserver, Suite::Startup];

    /// Lower-case name, used as the job name prefix and as the benchmark tool operation.
    pub fn name(self) -> &'static str {
        match self {
            Suite::Tsc => "tsc",
            Suite::Tsserver => "tsserver",
            Suite::Startup => "startup",
        }
    }

    /// `TSPERF_TSC`, set to `true` when a job runs this suite.
    pub fn enabled_var(self) -> &'static str {
        match self {
            Suite::Tsc => "TSPERF_TSC",
            Suite::Tsserver => "TSPERF_TSSERVER",
            Suite::Startup => "TSPERF_STARTUP",
        }
    }

    /// Comma separated host list for this suite.
    pub fn hosts_var(self) -> &'static str {
        match self {
            Suite::Tsc => "TSPERF_TSC_HOSTS",
            Suite::Tsserver => "TSPERF_TSSERVER_HOSTS",
            Suite::Startup => "TSPERF_STARTUP_HOSTS",
        }
    }

    /// Comma separated scenario list for this suite.
    pub fn scenarios_var(self) -> &'static str {
        match self {
            Suite::Tsc => "TSPERF_TSC_SCENARIOS",
            Suite::Tsserver => "TSPERF_TSSERVER_SCENARIOS",
            Suite::Startup => "TSPERF_STARTUP_SCENARIOS",
        }
    }

    pub fn iterations_var(self) -> &'static str {
        match self {
            Suite::Tsc => "TSPERF_TSC_ITERATIONS",
            Suite::Tsserver => "TSPERF_TSSERVER_ITERATIONS",
            Suite::Startup => "TSPERF_STARTUP_ITERATIONS",
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
