//! Connection settings for the external Airflow deployment.

/// Where, and as whom, to talk to Airflow.
///
/// Built once at startup and injected explicitly; nothing in this crate
/// reads the environment after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirflowConfig {
    pub host: String,
    pub username: String,
    pub password: String,
}

impl AirflowConfig {
    /// Read `AIRFLOW_HOST` / `AIRFLOW_USERNAME` / `AIRFLOW_PASSWORD`,
    /// falling back to the stock docker-compose defaults.
    pub fn from_env() -> Self {
        Self {
            host: env_or("AIRFLOW_HOST", "http://localhost:8080"),
            username: env_or("AIRFLOW_USERNAME", "airflow"),
            password: env_or("AIRFLOW_PASSWORD", "airflow"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
