//! Inference job runs as this system sees them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::model::EmbeddingModel;

/// Local view of a run's state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobRunStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// Caller-supplied inputs for one inference run.
///
/// Immutable once the run is created, except that `results_path` is filled
/// with a default before submission when the caller leaves it unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceJobRunInputs {
    /// Dataset location handed to the DAG (e.g. a Hugging Face dataset id).
    pub data_path: String,
    pub model: EmbeddingModel,
    /// Where the DAG writes embeddings, relative to the results root.
    #[serde(default)]
    pub results_path: Option<String>,
    /// Opaque model parameters, forwarded as-is.
    #[serde(default)]
    pub parameters: Map<String, JsonValue>,
}

/// Request body for `POST /inference_job_runs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceJobRunCreate {
    pub inputs: InferenceJobRunInputs,
}

/// One inference run.
///
/// Never persisted locally: every read rebuilds this from the orchestrator's
/// run record plus the conf echoed back with it.
///
/// Invariants: `result_path` is present iff the run succeeded (a naming
/// convention, not a guarantee the file exists); `error` is present only
/// when the run failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceJobRun {
    /// External run identifier, namespaced by the orchestrator.
    pub id: String,
    pub status: JobRunStatus,
    pub inputs: InferenceJobRunInputs,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub result_path: Option<String>,
    /// The orchestrator's free-text note, carried over verbatim on failure.
    pub error: Option<String>,
}
