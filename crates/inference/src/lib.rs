//! `genobench-inference`
//!
//! **Responsibility:** the batch-inference job-run logic.
//!
//! Two pieces:
//! - [`translate`]: pure mapping from an Airflow DAG-run record (plus the
//!   original request inputs) to an [`genobench_core::InferenceJobRun`].
//! - [`processor`]: trigger/status/list/results orchestration on top of a
//!   [`genobench_airflow::DagRunGateway`], owning run-id generation,
//!   results-path defaulting, and result-file resolution.
//!
//! Nothing here persists state. The conf attached to a run at trigger time
//! and echoed back by the orchestrator is the only storage substrate, so
//! every read re-derives its answer from scratch.

pub mod error;
pub mod processor;
pub mod translate;

pub use error::ProcessorError;
pub use processor::{BatchInferenceProcessor, INFERENCE_DAG_ID, ProcessorConfig};
pub use translate::{dag_run_to_job_run, inputs_from_conf};
