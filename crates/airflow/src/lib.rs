//! `genobench-airflow`
//!
//! Client for the external Airflow deployment that actually executes
//! inference runs. Airflow is a black box here: this crate only knows how to
//! exchange credentials for a bearer token and to trigger/read DAG runs over
//! the stable REST API. Scheduling, retries, and persistence all live on the
//! other side of the wire.

pub mod client;
pub mod config;
pub mod dag_run;
pub mod error;

pub use client::{AuthnAirflowClient, DagRunApi, DagRunGateway};
pub use config::AirflowConfig;
pub use dag_run::{DagRun, DagRunState, TriggerDagRunBody};
pub use error::AirflowError;
