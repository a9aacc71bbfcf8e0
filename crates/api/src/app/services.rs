use genobench_airflow::{AirflowConfig, AuthnAirflowClient};
use genobench_inference::{BatchInferenceProcessor, ProcessorConfig};

/// Everything the handlers need, wired once at startup.
///
/// The orchestrator client is the only outbound dependency; there is no
/// local store, cache, or background worker to manage.
pub struct AppServices {
    pub processor: BatchInferenceProcessor<AuthnAirflowClient>,
}

pub fn build_services(airflow: AirflowConfig, processor: ProcessorConfig) -> AppServices {
    let client = AuthnAirflowClient::new(airflow);
    AppServices {
        processor: BatchInferenceProcessor::new(client, processor),
    }
}
