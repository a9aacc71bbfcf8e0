use axum::Router;

pub mod inference_job_runs;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new().nest("/inference_job_runs", inference_job_runs::router())
}
