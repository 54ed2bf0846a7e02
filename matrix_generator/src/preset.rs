use std::fmt;

use itertools::Itertools;
use tsperf_core::prelude::{ConfigError, Suite};

/// A runtime that scenarios are executed under, for example `node@16.17.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Host {
    pub runtime: &'static str,
    pub version: &'static str,
}

impl Host {
    pub const fn new(runtime: &'static str, version: &'static str) -> Self {
        Self { runtime, version }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.runtime, self.version)
    }
}

/// Which hosts and scenarios to run for one suite, and how many times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteSpec {
    pub hosts: &'static [Host],
    pub iterations: u32,
    pub scenarios: &'static [&'static str],
}

/// A named bundle of suite configurations. A suite that is `None` is not run at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub tsc: Option<SuiteSpec>,
    pub tsserver: Option<SuiteSpec>,
    pub startup: Option<SuiteSpec>,
}

/// The host used when a preset does not compare runtimes.
pub const DEFAULT_HOST: Host = Host::new("node", "16.17.1");

const ALL_HOSTS: &[Host] = &[
    Host::new("node", "18.10.0"),
    DEFAULT_HOST,
    Host::new("node", "14.21.1"),
];

const TSC_SCENARIOS: &[&str] = &[
    "Angular",
    "Monaco",
    "TFS",
    "material-ui",
    "Compiler-Unions",
    "xstate",
];

const TSSERVER_SCENARIOS: &[&str] = &[
    "Compiler-UnionsTSServer",
    "CompilerTSServer",
    "xstateTSServer",
];

const STARTUP_SCENARIOS: &[&str] = &[
    "tsc-startup",
    "tsserver-startup",
    "tsserverlibrary-startup",
    "typescript-startup",
];

const PRESETS: &[(&str, Preset)] = &[
    (
        "full",
        Preset {
            tsc: Some(SuiteSpec {
                hosts: ALL_HOSTS,
                iterations: 6,
                scenarios: TSC_SCENARIOS,
            }),
            tsserver: Some(SuiteSpec {
                hosts: ALL_HOSTS,
                iterations: 6,
                scenarios: TSSERVER_SCENARIOS,
            }),
            startup: Some(SuiteSpec {
                hosts: ALL_HOSTS,
                iterations: 10,
                scenarios: STARTUP_SCENARIOS,
            }),
        },
    ),
    (
        "regular",
        Preset {
            tsc: Some(SuiteSpec {
                hosts: &[DEFAULT_HOST],
                iterations: 6,
                scenarios: TSC_SCENARIOS,
            }),
            tsserver: Some(SuiteSpec {
                hosts: &[DEFAULT_HOST],
                iterations: 6,
                scenarios: TSSERVER_SCENARIOS,
            }),
            startup: Some(SuiteSpec {
                hosts: &[DEFAULT_HOST],
                iterations: 10,
                scenarios: STARTUP_SCENARIOS,
            }),
        },
    ),
    (
        "tsc-only",
        Preset {
            tsc: Some(SuiteSpec {
                hosts: &[DEFAULT_HOST],
                iterations: 6,
                scenarios: TSC_SCENARIOS,
            }),
            tsserver: None,
            startup: None,
        },
    ),
    (
        "faster",
        Preset {
            tsc: Some(SuiteSpec {
                hosts: &[DEFAULT_HOST],
                iterations: 3,
                scenarios: TSC_SCENARIOS,
            }),
            tsserver: Some(SuiteSpec {
                hosts: &[DEFAULT_HOST],
                iterations: 3,
                scenarios: TSSERVER_SCENARIOS,
            }),
            startup: None,
        },
    ),
];

impl Preset {
    /// Find a preset by name.
    pub fn lookup(name: &str) -> Result<&'static Preset, ConfigError> {
        PRESETS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, preset)| preset)
            .ok_or_else(|| ConfigError::UnknownPreset {
                name: name.to_string(),
                known: Self::names().join(", "),
            })
    }

    /// Names of all known presets.
    pub fn names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(name, _)| *name)
    }

    pub fn suite(&self, suite: Suite) -> Option<&SuiteSpec> {
        match suite {
            Suite::Tsc => self.tsc.as_ref(),
            Suite::Tsserver => self.tsserver.as_ref(),
            Suite::Startup => self.startup.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_displays_as_runtime_at_version() {
        assert_eq!(DEFAULT_HOST.to_string(), "node@16.17.1");
    }

    #[test]
    fn lookup_unknown_preset_names_it() {
        let err = Preset::lookup("does-not-exist").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("does-not-exist"), "{message}");
        assert!(message.contains("tsc-only"), "{message}");
    }

    #[test]
    fn tsc_only_has_no_other_suites() {
        let preset = Preset::lookup("tsc-only").unwrap();

        assert!(preset.suite(Suite::Tsc).is_some());
        assert!(preset.suite(Suite::Tsserver).is_none());
        assert!(preset.suite(Suite::Startup).is_none());
    }

    #[test]
    fn presets_are_well_formed() {
        assert!(Preset::names().all_unique());

        for name in Preset::names() {
            let preset = Preset::lookup(name).unwrap();
            for suite in Suite::ALL {
                let Some(spec) = preset.suite(suite) else {
                    continue;
                };
                assert!(!spec.hosts.is_empty(), "{name}/{suite} has no hosts");
                assert!(spec.iterations > 0, "{name}/{suite} has no iterations");
                assert!(!spec.scenarios.is_empty(), "{name}/{suite} has no scenarios");
                assert!(
                    spec.scenarios.iter().all_unique(),
                    "{name}/{suite} repeats a scenario"
                );
            }
        }
    }
}
