mod cli;
mod matrix;
mod preset;
mod report;

pub mod prelude {
    pub use crate::cli::{CiProvider, GenerateMatrixCli};
    pub use crate::matrix::{
        generate_matrix, generate_matrix_for, sanitize_job_name, JobMatrix, JobParameters,
        MergeFlags, SuiteParameters, BASELINE_JOB_NAME,
    };
    pub use crate::preset::{Host, Preset, SuiteSpec, DEFAULT_HOST};
    pub use crate::report::{
        merge_output_name, write_matrix, AzurePipelinesReporter, GithubActionsReporter,
        OutputReporter, MATRIX_OUTPUT,
    };
}
