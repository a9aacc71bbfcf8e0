//! HTTP application wiring (axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: orchestrator client + processor construction
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use genobench_airflow::AirflowConfig;
use genobench_inference::ProcessorConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(airflow: AirflowConfig, processor: ProcessorConfig) -> Router {
    let services = Arc::new(services::build_services(airflow, processor));

    Router::new()
        .route("/ping", get(routes::system::ping))
        .merge(routes::router())
        .layer(Extension(services))
}
