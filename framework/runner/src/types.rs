/// Result type used throughout the runner. Errors carry enough context to be printed as-is.
pub type RunnerResult<T> = anyhow::Result<T>;
