//! `genobench-core`
//!
//! **Responsibility:** the domain model shared by the API surface and the
//! batch inference processor.
//!
//! This crate is pure data: no I/O, no clients, no framework types. Job runs
//! are *views* onto the external orchestrator's records, so everything here
//! is serde-serializable and cheap to rebuild.

pub mod job_run;
pub mod model;

pub use job_run::{InferenceJobRun, InferenceJobRunCreate, InferenceJobRunInputs, JobRunStatus};
pub use model::EmbeddingModel;
