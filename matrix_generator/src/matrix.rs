use std::collections::BTreeMap;

use itertools::Itertools;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tsperf_core::prelude::{ConfigError, Suite};

use crate::preset::{Preset, SuiteSpec};

/// Name of the only job created when running on the baseline machine.
pub const BASELINE_JOB_NAME: &str = "all";

/// Parameters for one suite within a job.
///
/// Values that are `None` are left out of the job entirely rather than being set to an empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteParameters {
    pub enabled: bool,
    pub hosts: Option<String>,
    pub scenarios: Option<String>,
    pub iterations: Option<u32>,
}

impl SuiteParameters {
    fn enabled(hosts: String, scenarios: String, iterations: u32) -> Self {
        Self {
            enabled: true,
            hosts: Some(hosts),
            scenarios: Some(scenarios),
            iterations: Some(iterations),
        }
    }

    fn disabled() -> Self {
        Self {
            enabled: false,
            hosts: None,
            scenarios: None,
            iterations: None,
        }
    }
}

/// The variables a single job is started with.
///
/// Serializes to a flat map of `TSPERF_*` variable names, which is how the orchestrator exposes
/// them to the job's environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobParameters {
    suites: BTreeMap<Suite, SuiteParameters>,
}

impl JobParameters {
    fn single(suite: Suite, parameters: SuiteParameters) -> Self {
        let mut job = Self::default();
        job.suites.insert(suite, parameters);
        job
    }

    pub fn suite(&self, suite: Suite) -> Option<&SuiteParameters> {
        self.suites.get(&suite)
    }

    /// The suites this job will actually run.
    pub fn enabled_suites(&self) -> impl Iterator<Item = Suite> + '_ {
        self.suites
            .iter()
            .filter(|(_, parameters)| parameters.enabled)
            .map(|(suite, _)| *suite)
    }
}

impl Serialize for JobParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (suite, parameters) in &self.suites {
            map.serialize_entry(suite.enabled_var(), &parameters.enabled)?;
            if let Some(hosts) = &parameters.hosts {
                map.serialize_entry(suite.hosts_var(), hosts)?;
            }
            if let Some(scenarios) = &parameters.scenarios {
                map.serialize_entry(suite.scenarios_var(), scenarios)?;
            }
            if let Some(iterations) = &parameters.iterations {
                map.serialize_entry(suite.iterations_var(), iterations)?;
            }
        }
        map.end()
    }
}

/// Whether results for a suite come from a job that has to be merged into a single report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeFlags {
    pub tsc: bool,
    pub tsserver: bool,
    pub startup: bool,
}

impl MergeFlags {
    pub fn get(&self, suite: Suite) -> bool {
        match suite {
            Suite::Tsc => self.tsc,
            Suite::Tsserver => self.tsserver,
            Suite::Startup => self.startup,
        }
    }

    fn set(&mut self, suite: Suite) {
        match suite {
            Suite::Tsc => self.tsc = true,
            Suite::Tsserver => self.tsserver = true,
            Suite::Startup => self.startup = true,
        }
    }
}

/// The jobs to run, keyed by job name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobMatrix {
    pub jobs: BTreeMap<String, JobParameters>,
    pub merge: MergeFlags,
}

/// Replace every character that is not ASCII alphanumeric or `_` with `_`.
pub fn sanitize_job_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Expand a preset into the jobs that run it.
///
/// When `baselining` every suite runs in a single job called [`BASELINE_JOB_NAME`] so that all
/// results come from the same machine. Otherwise there is one job per suite, host and scenario.
pub fn generate_matrix(preset: &Preset, baselining: bool) -> JobMatrix {
    let mut matrix = JobMatrix::default();

    if baselining {
        let mut job = JobParameters::default();
        for suite in Suite::ALL {
            let parameters = match preset.suite(suite) {
                Some(spec) => {
                    matrix.merge.set(suite);
                    SuiteParameters::enabled(
                        spec.hosts.iter().join(","),
                        spec.scenarios.iter().join(","),
                        spec.iterations,
                    )
                }
                None => SuiteParameters::disabled(),
            };
            job.suites.insert(suite, parameters);
        }
        matrix.jobs.insert(BASELINE_JOB_NAME.to_string(), job);
    } else {
        for suite in Suite::ALL {
            if let Some(spec) = preset.suite(suite) {
                matrix.merge.set(suite);
                fan_out(&mut matrix.jobs, suite, spec);
            }
        }
    }

    log::debug!(
        "Generated {} job(s), merge flags {:?}",
        matrix.jobs.len(),
        matrix.merge
    );

    matrix
}

/// Look up the preset called `name` and expand it, see [`generate_matrix`].
pub fn generate_matrix_for(name: &str, baselining: bool) -> Result<JobMatrix, ConfigError> {
    let preset = Preset::lookup(name)?;
    log::info!("Generating matrix for preset '{name}' (baselining: {baselining})");
    Ok(generate_matrix(preset, baselining))
}

fn fan_out(jobs: &mut BTreeMap<String, JobParameters>, suite: Suite, spec: &SuiteSpec) {
    for host in spec.hosts {
        for scenario in spec.scenarios {
            let name = sanitize_job_name(&format!("{suite}_{host}_{scenario}"));
            let job = JobParameters::single(
                suite,
                SuiteParameters::enabled(host.to_string(), scenario.to_string(), spec.iterations),
            );
            if jobs.insert(name.clone(), job).is_some() {
                log::warn!("Job '{name}' was defined more than once, keeping the last definition");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::preset::{Host, DEFAULT_HOST};

    const HOSTS: &[Host] = &[Host::new("node", "18.10.0"), Host::new("bun", "1.0")];

    fn preset_with_tsserver(scenarios: &'static [&'static str]) -> Preset {
        Preset {
            tsc: None,
            tsserver: Some(SuiteSpec {
                hosts: HOSTS,
                iterations: 2,
                scenarios,
            }),
            startup: None,
        }
    }

    #[test]
    fn sanitize_replaces_everything_outside_word_characters() {
        assert_eq!(
            sanitize_job_name("tsc_node@16.17.1_material-ui"),
            "tsc_node_16_17_1_material_ui"
        );
        assert_eq!(sanitize_job_name("a b/c:d"), "a_b_c_d");
        assert_eq!(sanitize_job_name("Already_Clean_09"), "Already_Clean_09");
        assert_eq!(sanitize_job_name("ünï"), "_n_");
    }

    #[test]
    fn fan_out_creates_one_job_per_host_and_scenario() {
        let matrix = generate_matrix(&preset_with_tsserver(&["One", "Two", "Three"]), false);

        assert_eq!(matrix.jobs.len(), 6);
        assert_eq!(
            matrix.merge,
            MergeFlags {
                tsc: false,
                tsserver: true,
                startup: false
            }
        );

        let job = &matrix.jobs["tsserver_bun_1_0_Two"];
        assert_eq!(job.enabled_suites().collect::<Vec<_>>(), vec![Suite::Tsserver]);
        assert_eq!(
            serde_json::to_value(job).unwrap(),
            json!({
                "TSPERF_TSSERVER": true,
                "TSPERF_TSSERVER_HOSTS": "bun@1.0",
                "TSPERF_TSSERVER_SCENARIOS": "Two",
                "TSPERF_TSSERVER_ITERATIONS": 2,
            })
        );
    }

    #[test]
    fn duplicate_job_names_keep_the_last_definition() {
        // Both sanitize to the same job name
        let matrix = generate_matrix(&preset_with_tsserver(&["a-b", "a.b"]), false);

        assert_eq!(matrix.jobs.len(), 2);
        let job = &matrix.jobs["tsserver_node_18_10_0_a_b"];
        assert_eq!(
            job.suite(Suite::Tsserver).unwrap().scenarios.as_deref(),
            Some("a.b")
        );
    }

    #[test]
    fn baselining_creates_a_single_job_for_all_suites() {
        let preset = Preset {
            tsc: Some(SuiteSpec {
                hosts: &[DEFAULT_HOST],
                iterations: 6,
                scenarios: &["Angular", "Monaco"],
            }),
            tsserver: None,
            startup: Some(SuiteSpec {
                hosts: HOSTS,
                iterations: 10,
                scenarios: &["tsc-startup"],
            }),
        };

        let matrix = generate_matrix(&preset, true);

        assert_eq!(matrix.jobs.keys().collect::<Vec<_>>(), vec![BASELINE_JOB_NAME]);
        assert_eq!(
            matrix.merge,
            MergeFlags {
                tsc: true,
                tsserver: false,
                startup: true
            }
        );
        assert_eq!(
            serde_json::to_value(&matrix.jobs[BASELINE_JOB_NAME]).unwrap(),
            json!({
                "TSPERF_TSC": true,
                "TSPERF_TSC_HOSTS": "node@16.17.1",
                "TSPERF_TSC_SCENARIOS": "Angular,Monaco",
                "TSPERF_TSC_ITERATIONS": 6,
                "TSPERF_TSSERVER": false,
                "TSPERF_STARTUP": true,
                "TSPERF_STARTUP_HOSTS": "node@18.10.0,bun@1.0",
                "TSPERF_STARTUP_SCENARIOS": "tsc-startup",
                "TSPERF_STARTUP_ITERATIONS": 10,
            })
        );
    }

    #[test]
    fn empty_preset_produces_no_jobs_when_fanning_out() {
        let preset = Preset {
            tsc: None,
            tsserver: None,
            startup: None,
        };

        let matrix = generate_matrix(&preset, false);

        assert!(matrix.jobs.is_empty());
        assert_eq!(matrix.merge, MergeFlags::default());
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let err = generate_matrix_for("nope", false).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset { name, .. } if name == "nope"));
    }
}
