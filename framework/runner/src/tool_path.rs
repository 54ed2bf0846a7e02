use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tsperf_core::prelude::Env;

use crate::types::RunnerResult;

/// Environment variable holding the benchmark tool executable.
pub const TSPERF_EXE_ENV: &str = "TSPERF_EXE";

/// Get the path to the benchmark tool.
///
/// [`TSPERF_EXE_ENV`] must be set. A value that names an existing file is used as-is, a bare
/// command name is looked up on the `PATH` from `env`.
pub fn tsperf_exe(env: &Env) -> RunnerResult<PathBuf> {
    let value = env.required(TSPERF_EXE_ENV)?;

    let path = PathBuf::from(value);
    if path.is_file() {
        // Commands are looked up on PATH, not in the current directory
        return std::path::absolute(&path)
            .with_context(|| format!("Failed to resolve '{value}' to an absolute path"));
    }

    if path.components().count() == 1 {
        log::warn!("'{TSPERF_EXE_ENV}={value}' is not a path so looking in 'PATH'");
        let cwd = std::env::current_dir().context("Failed to get the current directory")?;
        return which::which_in(value, env.optional("PATH"), cwd).with_context(|| {
            format!("'{value}' was not found in PATH. Set '{TSPERF_EXE_ENV}' to the benchmark tool.")
        });
    }

    bail!(
        "Benchmark tool set with '{TSPERF_EXE_ENV}={path}' but that path doesn't exist",
        path = Path::new(value).display()
    )
}

#[cfg(test)]
mod tests {
    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt as _;

    use tempfile::{NamedTempFile, TempDir};
    use tsperf_core::prelude::ConfigError;

    use super::*;

    #[test]
    fn missing_variable_is_a_config_error() {
        let err = tsperf_exe(&Env::default()).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::MissingEnv(TSPERF_EXE_ENV.to_string()))
        );
    }

    #[test]
    fn should_not_get_path_if_not_exist() {
        let env = Env::from_iter([(TSPERF_EXE_ENV, "/non/existent/path/to/tsperf")]);
        assert!(tsperf_exe(&env).is_err());
    }

    #[test]
    fn should_get_path_from_env() {
        let temp = NamedTempFile::new().expect("failed to create temp file");
        let test_path = temp.path().to_str().expect("failed to get temp file path");
        let env = Env::from_iter([(TSPERF_EXE_ENV, test_path)]);

        let result = tsperf_exe(&env).expect("failed to get tsperf path");
        assert_eq!(result, PathBuf::from(test_path));
    }

    #[test]
    fn relative_path_is_made_absolute() {
        let temp = tempfile::Builder::new()
            .tempfile_in(".")
            .expect("failed to create temp file");
        let name = temp.path().file_name().unwrap().to_str().unwrap();
        let env = Env::from_iter([(TSPERF_EXE_ENV, name)]);

        let result = tsperf_exe(&env).expect("failed to get tsperf path");
        assert!(result.is_absolute(), "{}", result.display());
        assert_eq!(result, std::env::current_dir().unwrap().join(name));
    }

    #[cfg(unix)]
    #[test]
    fn should_look_up_bare_name_on_path() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let exe = temp.path().join("ts-perf");
        std::fs::write(&exe, "#!/bin/sh\n").expect("failed to create ts-perf file");
        let mut perms = std::fs::metadata(&exe).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&exe, perms).unwrap();

        let env = Env::from_iter([
            (TSPERF_EXE_ENV, "ts-perf".to_string()),
            ("PATH", temp.path().display().to_string()),
        ]);

        let result = tsperf_exe(&env).expect("failed to find ts-perf on PATH");
        assert_eq!(result, exe);
    }

    #[test]
    fn should_not_find_bare_name_without_path() {
        let env = Env::from_iter([(TSPERF_EXE_ENV, "ts-perf-not-installed")]);
        assert!(tsperf_exe(&env).is_err());
    }
}
