use thiserror::Error;

use genobench_airflow::AirflowError;

/// Failures surfaced by the batch inference processor.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The run has not succeeded, so its results do not exist yet by
    /// definition, whatever is on disk.
    #[error("results not available yet")]
    ResultsNotReady,

    /// The run succeeded but the result file is absent.
    #[error("results not available")]
    ResultsMissing,

    /// Orchestrator-side failure, passed through untouched.
    #[error(transparent)]
    Orchestrator(#[from] AirflowError),
}
