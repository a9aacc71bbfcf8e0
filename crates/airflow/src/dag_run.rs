//! Wire types for Airflow's DAG-run resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The run-state vocabulary Airflow reports.
///
/// The catch-all variant keeps deserialization total: a state this build has
/// never heard of becomes [`DagRunState::Other`] instead of an error, and
/// callers decide what to do with it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DagRunState {
    Queued,
    Running,
    Success,
    Failed,
    #[serde(other)]
    Other,
}

/// One DAG-run record, as returned by the dagRuns endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DagRun {
    pub dag_run_id: String,
    pub state: DagRunState,
    #[serde(default)]
    pub logical_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Free-text note; Airflow operators use it for failure context.
    #[serde(default)]
    pub note: Option<String>,
    /// Configuration attached at trigger time and echoed back on every read.
    #[serde(default)]
    pub conf: Option<JsonValue>,
}

/// Body for `POST .../dagRuns`.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerDagRunBody {
    pub dag_run_id: String,
    pub logical_date: DateTime<Utc>,
    pub conf: JsonValue,
}

/// Envelope around the dagRuns collection endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct DagRunCollection {
    #[serde(default)]
    pub dag_runs: Vec<DagRun>,
}
