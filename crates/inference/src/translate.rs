//! Mapping between Airflow's view of a run and ours.

use chrono::Utc;
use serde_json::Value as JsonValue;

use genobench_airflow::{DagRun, DagRunState};
use genobench_core::{InferenceJobRun, InferenceJobRunInputs, JobRunStatus};

/// Total mapping from Airflow's run-state vocabulary to ours.
///
/// States this build does not recognize read as PENDING rather than
/// erroring; the orchestrator may grow vocabulary we have not seen.
fn status_for(state: DagRunState) -> JobRunStatus {
    match state {
        DagRunState::Queued => JobRunStatus::Pending,
        DagRunState::Running => JobRunStatus::Running,
        DagRunState::Success => JobRunStatus::Succeeded,
        DagRunState::Failed => JobRunStatus::Failed,
        DagRunState::Other => JobRunStatus::Pending,
    }
}

/// Build an [`InferenceJobRun`] from a DAG-run record and the inputs that
/// produced it. Pure; no I/O, no failures for any state value.
///
/// - `started_at` falls back from start time to logical date to "now".
/// - `result_path` is set only for succeeded runs: the inputs' own
///   `results_path` when known, else the `{run_id}/embeddings.csv`
///   convention. A convention, not a guarantee the file exists.
/// - `error` carries the run's note only on failure; notes on other states
///   are discarded.
pub fn dag_run_to_job_run(dag_run: DagRun, inputs: InferenceJobRunInputs) -> InferenceJobRun {
    let status = status_for(dag_run.state);

    let result_path = if status == JobRunStatus::Succeeded {
        Some(
            inputs
                .results_path
                .clone()
                .unwrap_or_else(|| format!("{}/embeddings.csv", dag_run.dag_run_id)),
        )
    } else {
        None
    };
    let error = if status == JobRunStatus::Failed {
        dag_run.note
    } else {
        None
    };

    InferenceJobRun {
        status,
        started_at: dag_run
            .start_date
            .or(dag_run.logical_date)
            .unwrap_or_else(Utc::now),
        finished_at: dag_run.end_date,
        id: dag_run.dag_run_id,
        inputs,
        result_path,
        error,
    }
}

/// Rebuild run inputs from the conf echoed back by the orchestrator.
///
/// Fail-open: a missing or malformed field gets its default rather than an
/// error, so runs triggered by older builds stay readable.
pub fn inputs_from_conf(conf: Option<&JsonValue>) -> InferenceJobRunInputs {
    let conf = conf.unwrap_or(&JsonValue::Null);
    InferenceJobRunInputs {
        data_path: conf
            .get("data_path")
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string(),
        model: conf
            .get("model")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default(),
        results_path: conf
            .get("results_path")
            .and_then(JsonValue::as_str)
            .map(str::to_string),
        parameters: conf
            .get("parameters")
            .and_then(JsonValue::as_object)
            .cloned()
            .unwrap_or_default(),
    }
}
