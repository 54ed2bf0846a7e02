/// Problems with the inputs of a run.
///
/// These are never retried. The binaries report them and exit non-zero.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown preset '{name}', expected one of: {known}")]
    UnknownPreset { name: String, known: String },
    #[error("Expected environment variable '{0}' to be set")]
    MissingEnv(String),
    #[error("Expected a non-empty value for '--{0}'")]
    MissingFlag(String),
    #[error("Could not find '{0}'")]
    MissingArtifact(String),
}
