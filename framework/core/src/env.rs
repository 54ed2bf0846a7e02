use std::collections::HashMap;

use crate::error::ConfigError;

/// A read-only snapshot of the environment variables a job was started with.
///
/// Captured once at startup so that validation happens up front and so that tests can supply
/// their own values without touching the process environment.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Capture the current process environment.
    ///
    /// Variables that are not valid unicode are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// The value of `name`, treating an empty value the same as an unset one.
    pub fn optional(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The value of `name`, which must be set to a non-empty value.
    pub fn required(&self, name: &str) -> Result<&str, ConfigError> {
        self.optional(name).ok_or_else(|| {
            log::debug!("Required environment variable '{name}' is not set");
            ConfigError::MissingEnv(name.to_string())
        })
    }

    /// Interpret `name` as a boolean flag, see [`parse_bool_flag`].
    pub fn flag(&self, name: &str) -> bool {
        self.optional(name).is_some_and(parse_bool_flag)
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Pipeline variables are strings, only a case-insensitive `true` switches a flag on.
pub fn parse_bool_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_treated_as_unset() {
        let env = Env::from_iter([("A", ""), ("B", "value")]);

        assert_eq!(env.optional("A"), None);
        assert_eq!(env.optional("B"), Some("value"));
        assert_eq!(env.optional("C"), None);
    }

    #[test]
    fn required_names_the_missing_variable() {
        let env = Env::from_iter([("TSPERF_EXE", "")]);

        let err = env.required("TSPERF_EXE").unwrap_err();
        assert_eq!(err, ConfigError::MissingEnv("TSPERF_EXE".to_string()));
        assert!(err.to_string().contains("TSPERF_EXE"));
    }

    #[test]
    fn bool_flags_only_accept_true() {
        assert!(parse_bool_flag("true"));
        assert!(parse_bool_flag("TRUE"));
        assert!(parse_bool_flag("True"));
        assert!(!parse_bool_flag("1"));
        assert!(!parse_bool_flag("yes"));
        assert!(!parse_bool_flag(""));
        assert!(!parse_bool_flag("false"));
        assert!(!parse_bool_flag(" true"));
        assert!(!parse_bool_flag("true\n"));
    }

    #[test]
    fn unset_flag_is_false() {
        let env = Env::from_iter([("TSPERF_BLOB_LATEST", "TrUe")]);

        assert!(env.flag("TSPERF_BLOB_LATEST"));
        assert!(!env.flag("USE_BASELINE_MACHINE"));
    }
}
