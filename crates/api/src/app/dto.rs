use serde::Deserialize;

/// Query string for `GET /inference_job_runs`.
#[derive(Debug, Deserialize)]
pub struct ListRunsQuery {
    /// Orchestrator state value, handed through verbatim.
    pub status: Option<String>,
}
