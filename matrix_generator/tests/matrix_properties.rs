use pretty_assertions::assert_eq;
use tsperf_core::prelude::Suite;
use tsperf_matrix::prelude::*;

#[test]
fn fan_out_job_count_is_hosts_times_scenarios() {
    for name in Preset::names() {
        let preset = Preset::lookup(name).unwrap();
        let matrix = generate_matrix(preset, false);

        let mut expected_total = 0;
        for suite in Suite::ALL {
            let jobs_for_suite = matrix
                .jobs
                .values()
                .filter(|job| job.suite(suite).is_some())
                .count();
            let expected = preset
                .suite(suite)
                .map_or(0, |spec| spec.hosts.len() * spec.scenarios.len());
            assert_eq!(jobs_for_suite, expected, "{name}/{suite}");
            expected_total += expected;
        }
        assert_eq!(matrix.jobs.len(), expected_total, "{name}");

        for (job_name, job) in &matrix.jobs {
            assert_eq!(job.enabled_suites().count(), 1, "{name}/{job_name}");
        }
    }
}

#[test]
fn baselining_always_creates_one_job() {
    for name in Preset::names() {
        let preset = Preset::lookup(name).unwrap();
        let matrix = generate_matrix(preset, true);

        assert_eq!(matrix.jobs.len(), 1, "{name}");
        let job = &matrix.jobs[BASELINE_JOB_NAME];
        for suite in Suite::ALL {
            let parameters = job.suite(suite).unwrap();
            assert_eq!(parameters.enabled, preset.suite(suite).is_some(), "{name}/{suite}");
            assert_eq!(parameters.hosts.is_some(), parameters.enabled);
            assert_eq!(parameters.scenarios.is_some(), parameters.enabled);
            assert_eq!(parameters.iterations.is_some(), parameters.enabled);
        }
    }
}

#[test]
fn merge_flags_follow_preset_suites_in_both_modes() {
    for name in Preset::names() {
        let preset = Preset::lookup(name).unwrap();
        for baselining in [true, false] {
            let matrix = generate_matrix(preset, baselining);
            for suite in Suite::ALL {
                assert_eq!(
                    matrix.merge.get(suite),
                    preset.suite(suite).is_some(),
                    "{name}/{suite} baselining={baselining}"
                );
            }
        }
    }
}

#[test]
fn job_names_only_contain_word_characters() {
    for name in Preset::names() {
        let matrix = generate_matrix(Preset::lookup(name).unwrap(), false);
        for job_name in matrix.jobs.keys() {
            assert!(
                job_name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "{job_name}"
            );
        }
    }
}
