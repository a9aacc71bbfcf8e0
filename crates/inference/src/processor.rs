//! Trigger, poll, and fetch results for inference DAG runs.

use std::path::PathBuf;

use chrono::Utc;
use uuid::Uuid;

use genobench_airflow::{DagRunGateway, TriggerDagRunBody};
use genobench_core::{InferenceJobRun, InferenceJobRunCreate, JobRunStatus};

use crate::error::ProcessorError;
use crate::translate::{dag_run_to_job_run, inputs_from_conf};

/// The DAG that executes a batch embedding job.
pub const INFERENCE_DAG_ID: &str = "execute_inference_helical_model_dag";

/// Marks runs triggered through this API, as opposed to schedules or manual
/// UI triggers.
const RUN_ID_PREFIX: &str = "api__";

/// Local settings for the processor.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Directory the DAG writes embeddings under; result paths resolve
    /// against it.
    pub results_dir: PathBuf,
}

impl ProcessorConfig {
    /// Read `RESULTS_DIR`, defaulting to `./results`.
    pub fn from_env() -> Self {
        let results_dir = std::env::var("RESULTS_DIR").unwrap_or_else(|_| "./results".to_string());
        Self {
            results_dir: PathBuf::from(results_dir),
        }
    }
}

/// Orchestrates inference job runs against an external [`DagRunGateway`].
///
/// Holds no mutable state: every read re-derives its answer from the
/// orchestrator, and the conf attached at trigger time is the only place
/// run inputs are remembered.
#[derive(Debug, Clone)]
pub struct BatchInferenceProcessor<C> {
    client: C,
    config: ProcessorConfig,
}

impl<C: DagRunGateway> BatchInferenceProcessor<C> {
    pub fn new(client: C, config: ProcessorConfig) -> Self {
        Self { client, config }
    }

    /// Trigger a new run.
    ///
    /// The run id is a fresh random token under the `api__` prefix; no
    /// collision handling, the space is large enough. The default
    /// `results_path` is filled in *before* submission so it lands in the
    /// run's conf, where later reads reconstruct it from.
    pub async fn trigger(
        &self,
        mut job_create: InferenceJobRunCreate,
    ) -> Result<InferenceJobRun, ProcessorError> {
        let dag_run_id = format!("{RUN_ID_PREFIX}{}", Uuid::new_v4());
        if job_create.inputs.results_path.is_none() {
            job_create.inputs.results_path = Some(format!("{dag_run_id}/embeddings.csv"));
        }

        let inputs = &job_create.inputs;
        let conf = serde_json::json!({
            "data_path": inputs.data_path,
            "model": inputs.model,
            "results_path": inputs.results_path,
            "parameters": inputs.parameters,
        });

        tracing::info!(%dag_run_id, model = ?inputs.model, "triggering inference run");
        let dag_run = self
            .client
            .trigger_dag_run(
                INFERENCE_DAG_ID,
                TriggerDagRunBody {
                    dag_run_id,
                    logical_date: Utc::now(),
                    conf,
                },
            )
            .await?;
        Ok(dag_run_to_job_run(dag_run, job_create.inputs))
    }

    /// Fetch one run, rebuilding its inputs from the echoed conf.
    pub async fn get_status(&self, dag_run_id: &str) -> Result<InferenceJobRun, ProcessorError> {
        let dag_run = self.client.get_dag_run(INFERENCE_DAG_ID, dag_run_id).await?;
        let inputs = inputs_from_conf(dag_run.conf.as_ref());
        Ok(dag_run_to_job_run(dag_run, inputs))
    }

    /// List runs, newest first.
    ///
    /// The status filter goes to the orchestrator verbatim; an unknown value
    /// simply matches nothing.
    pub async fn list(&self, status: Option<&str>) -> Result<Vec<InferenceJobRun>, ProcessorError> {
        let dag_runs = self.client.list_dag_runs(INFERENCE_DAG_ID, status).await?;
        let mut runs: Vec<InferenceJobRun> = dag_runs
            .into_iter()
            .map(|dag_run| {
                let inputs = inputs_from_conf(dag_run.conf.as_ref());
                dag_run_to_job_run(dag_run, inputs)
            })
            .collect();
        // Stable: ties keep the order the orchestrator returned.
        runs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(runs)
    }

    /// Resolve the result file for a run.
    ///
    /// Two gates, both 404 at the boundary: the run must have succeeded
    /// (results do not exist before then, whatever is on disk), and the
    /// file must actually be present under the results root.
    pub async fn get_results(&self, dag_run_id: &str) -> Result<PathBuf, ProcessorError> {
        let run = self.get_status(dag_run_id).await?;
        if run.status != JobRunStatus::Succeeded {
            return Err(ProcessorError::ResultsNotReady);
        }

        let full_path = self.config.results_dir.join(run.result_path.unwrap_or_default());
        if full_path.is_file() {
            Ok(full_path)
        } else {
            Err(ProcessorError::ResultsMissing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use genobench_airflow::{AirflowError, DagRun, DagRunState};
    use genobench_core::{EmbeddingModel, InferenceJobRunInputs};

    /// In-memory stand-in for Airflow: records calls, replays canned runs.
    #[derive(Default)]
    struct FakeGateway {
        triggered: Mutex<Vec<(String, TriggerDagRunBody)>>,
        get_response: Mutex<Option<DagRun>>,
        get_requests: Mutex<Vec<(String, String)>>,
        list_response: Mutex<Vec<DagRun>>,
        list_filters: Mutex<Vec<Option<String>>>,
    }

    impl DagRunGateway for &FakeGateway {
        async fn trigger_dag_run(
            &self,
            dag_id: &str,
            body: TriggerDagRunBody,
        ) -> Result<DagRun, AirflowError> {
            let echoed = DagRun {
                dag_run_id: body.dag_run_id.clone(),
                state: DagRunState::Queued,
                logical_date: Some(body.logical_date),
                start_date: None,
                end_date: None,
                note: None,
                conf: Some(body.conf.clone()),
            };
            self.triggered.lock().unwrap().push((dag_id.to_string(), body));
            Ok(echoed)
        }

        async fn get_dag_run(
            &self,
            dag_id: &str,
            dag_run_id: &str,
        ) -> Result<DagRun, AirflowError> {
            self.get_requests
                .lock()
                .unwrap()
                .push((dag_id.to_string(), dag_run_id.to_string()));
            Ok(self
                .get_response
                .lock()
                .unwrap()
                .clone()
                .expect("test did not stub a get response"))
        }

        async fn list_dag_runs(
            &self,
            _dag_id: &str,
            state: Option<&str>,
        ) -> Result<Vec<DagRun>, AirflowError> {
            self.list_filters.lock().unwrap().push(state.map(str::to_string));
            Ok(self.list_response.lock().unwrap().clone())
        }
    }

    fn processor(gateway: &FakeGateway) -> BatchInferenceProcessor<&FakeGateway> {
        BatchInferenceProcessor::new(
            gateway,
            ProcessorConfig {
                results_dir: PathBuf::from("/nonexistent"),
            },
        )
    }

    fn job_create() -> InferenceJobRunCreate {
        InferenceJobRunCreate {
            inputs: InferenceJobRunInputs {
                data_path: "s3://bucket/data".to_string(),
                model: EmbeddingModel::Geneformer,
                results_path: None,
                parameters: Default::default(),
            },
        }
    }

    fn stored_run(id: &str, state: DagRunState, started: chrono::DateTime<Utc>) -> DagRun {
        DagRun {
            dag_run_id: id.to_string(),
            state,
            logical_date: Some(started),
            start_date: Some(started),
            end_date: None,
            note: None,
            conf: Some(json!({
                "data_path": "s3://bucket/data",
                "model": "geneformer",
                "results_path": format!("{id}/embeddings.csv"),
                "parameters": {},
            })),
        }
    }

    #[tokio::test]
    async fn trigger_targets_the_inference_dag() {
        let gateway = FakeGateway::default();
        processor(&gateway).trigger(job_create()).await.unwrap();

        let triggered = gateway.triggered.lock().unwrap();
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].0, INFERENCE_DAG_ID);
    }

    #[tokio::test]
    async fn trigger_ids_are_prefixed_and_unique() {
        let gateway = FakeGateway::default();
        let processor = processor(&gateway);

        let mut ids = HashSet::new();
        for _ in 0..1000 {
            let run = processor.trigger(job_create()).await.unwrap();
            assert!(run.id.starts_with("api__"), "unexpected id {}", run.id);
            ids.insert(run.id);
        }
        assert_eq!(ids.len(), 1000);
    }

    #[tokio::test]
    async fn trigger_defaults_results_path_into_conf() {
        let gateway = FakeGateway::default();
        processor(&gateway).trigger(job_create()).await.unwrap();

        let triggered = gateway.triggered.lock().unwrap();
        let body = &triggered[0].1;
        let results_path = body.conf["results_path"].as_str().unwrap();
        assert_eq!(results_path, format!("{}/embeddings.csv", body.dag_run_id));
    }

    #[tokio::test]
    async fn trigger_preserves_explicit_results_path() {
        let gateway = FakeGateway::default();
        let mut create = job_create();
        create.inputs.results_path = Some("custom/path.csv".to_string());
        processor(&gateway).trigger(create).await.unwrap();

        let triggered = gateway.triggered.lock().unwrap();
        assert_eq!(triggered[0].1.conf["results_path"], "custom/path.csv");
    }

    #[tokio::test]
    async fn trigger_conf_carries_the_inputs() {
        let gateway = FakeGateway::default();
        let mut create = job_create();
        create.inputs.parameters.insert("lr".to_string(), json!(0.01));
        processor(&gateway).trigger(create).await.unwrap();

        let triggered = gateway.triggered.lock().unwrap();
        let conf = &triggered[0].1.conf;
        assert_eq!(conf["data_path"], "s3://bucket/data");
        assert_eq!(conf["model"], "geneformer");
        assert_eq!(conf["parameters"]["lr"], 0.01);
    }

    #[tokio::test]
    async fn trigger_returns_the_translated_run() {
        let gateway = FakeGateway::default();
        let run = processor(&gateway).trigger(job_create()).await.unwrap();

        assert_eq!(run.status, JobRunStatus::Pending);
        assert_eq!(run.inputs.data_path, "s3://bucket/data");
        assert!(run.inputs.results_path.is_some());
    }

    #[tokio::test]
    async fn get_status_reconstructs_inputs_from_conf() {
        let gateway = FakeGateway::default();
        let mut run = stored_run("run-456", DagRunState::Running, Utc::now());
        run.conf = Some(json!({ "data_path": "s3://other", "model": "scgpt" }));
        *gateway.get_response.lock().unwrap() = Some(run);

        let status = processor(&gateway).get_status("run-456").await.unwrap();
        assert_eq!(status.inputs.data_path, "s3://other");
        assert_eq!(status.inputs.model, EmbeddingModel::ScGpt);

        let requests = gateway.get_requests.lock().unwrap();
        assert_eq!(
            *requests,
            vec![(INFERENCE_DAG_ID.to_string(), "run-456".to_string())]
        );
    }

    #[tokio::test]
    async fn get_status_tolerates_empty_conf() {
        let gateway = FakeGateway::default();
        let mut run = stored_run("run-123", DagRunState::Queued, Utc::now());
        run.conf = Some(json!({}));
        *gateway.get_response.lock().unwrap() = Some(run);

        let status = processor(&gateway).get_status("run-123").await.unwrap();
        assert_eq!(status.inputs.data_path, "");
        assert_eq!(status.inputs.model, EmbeddingModel::Geneformer);
        assert!(status.inputs.parameters.is_empty());
    }

    #[tokio::test]
    async fn list_with_no_runs_is_empty() {
        let gateway = FakeGateway::default();
        let runs = processor(&gateway).list(None).await.unwrap();
        assert!(runs.is_empty());
    }

    #[tokio::test]
    async fn list_sorts_newest_first() {
        let gateway = FakeGateway::default();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        *gateway.list_response.lock().unwrap() = vec![
            stored_run("run-1", DagRunState::Success, t1),
            stored_run("run-2", DagRunState::Running, t2),
        ];

        let runs = processor(&gateway).list(None).await.unwrap();
        let ids: Vec<&str> = runs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["run-2", "run-1"]);
    }

    #[tokio::test]
    async fn list_passes_the_filter_through_verbatim() {
        let gateway = FakeGateway::default();
        let processor = processor(&gateway);
        processor.list(Some("running")).await.unwrap();
        processor.list(None).await.unwrap();
        processor.list(Some("no-such-state")).await.unwrap();

        let filters = gateway.list_filters.lock().unwrap();
        assert_eq!(
            *filters,
            vec![
                Some("running".to_string()),
                None,
                Some("no-such-state".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn results_require_success_regardless_of_filesystem() {
        let gateway = FakeGateway::default();
        let results_dir = tempfile::tempdir().unwrap();

        // File is present, but the run has not succeeded.
        std::fs::create_dir_all(results_dir.path().join("run-123")).unwrap();
        std::fs::write(
            results_dir.path().join("run-123/embeddings.csv"),
            "1.0,2.0\n",
        )
        .unwrap();
        *gateway.get_response.lock().unwrap() =
            Some(stored_run("run-123", DagRunState::Running, Utc::now()));

        let processor = BatchInferenceProcessor::new(
            &gateway,
            ProcessorConfig {
                results_dir: results_dir.path().to_path_buf(),
            },
        );
        let err = processor.get_results("run-123").await.unwrap_err();
        assert!(matches!(err, ProcessorError::ResultsNotReady));
    }

    #[tokio::test]
    async fn results_require_the_file_to_exist() {
        let gateway = FakeGateway::default();
        let results_dir = tempfile::tempdir().unwrap();
        *gateway.get_response.lock().unwrap() =
            Some(stored_run("run-123", DagRunState::Success, Utc::now()));

        let processor = BatchInferenceProcessor::new(
            &gateway,
            ProcessorConfig {
                results_dir: results_dir.path().to_path_buf(),
            },
        );
        let err = processor.get_results("run-123").await.unwrap_err();
        assert!(matches!(err, ProcessorError::ResultsMissing));
    }

    #[tokio::test]
    async fn results_resolve_under_the_results_root() {
        let gateway = FakeGateway::default();
        let results_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(results_dir.path().join("run-123")).unwrap();
        std::fs::write(
            results_dir.path().join("run-123/embeddings.csv"),
            "1.0,2.0\n",
        )
        .unwrap();
        *gateway.get_response.lock().unwrap() =
            Some(stored_run("run-123", DagRunState::Success, Utc::now()));

        let processor = BatchInferenceProcessor::new(
            &gateway,
            ProcessorConfig {
                results_dir: results_dir.path().to_path_buf(),
            },
        );
        let path = processor.get_results("run-123").await.unwrap();
        assert_eq!(path, results_dir.path().join("run-123/embeddings.csv"));
    }
}
