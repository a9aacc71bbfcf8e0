use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{Extension, Path, Query},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use tokio_util::io::ReaderStream;

use genobench_core::InferenceJobRunCreate;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_inference_job_runs).post(create_inference_job_run))
        .route("/:id", get(get_inference_job_run))
        .route("/:id/results", get(get_inference_job_run_results))
}

pub async fn list_inference_job_runs(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListRunsQuery>,
) -> axum::response::Response {
    match services.processor.list(query.status.as_deref()).await {
        Ok(runs) => (StatusCode::OK, Json(runs)).into_response(),
        Err(e) => errors::processor_error_to_response(e),
    }
}

pub async fn create_inference_job_run(
    Extension(services): Extension<Arc<AppServices>>,
    Json(job_create): Json<InferenceJobRunCreate>,
) -> axum::response::Response {
    match services.processor.trigger(job_create).await {
        Ok(run) => (StatusCode::CREATED, Json(run)).into_response(),
        Err(e) => errors::processor_error_to_response(e),
    }
}

pub async fn get_inference_job_run(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.processor.get_status(&id).await {
        Ok(run) => (StatusCode::OK, Json(run)).into_response(),
        Err(e) => errors::processor_error_to_response(e),
    }
}

pub async fn get_inference_job_run_results(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let path = match services.processor.get_results(&id).await {
        Ok(path) => path,
        Err(e) => return errors::processor_error_to_response(e),
    };

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        // Vanished between the existence gate and the open.
        Err(_) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "results not available");
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"embeddings.csv\"",
            ),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response()
}
