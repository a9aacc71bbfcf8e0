use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to Airflow.
///
/// None of these are retried locally; they surface at the API boundary as
/// 5xx responses.
#[derive(Debug, Error)]
pub enum AirflowError {
    /// The token endpoint answered with something other than 201.
    #[error("failed to get access token: {status} {body}")]
    Auth { status: StatusCode, body: String },

    /// Airflow answered an API call with a non-success status.
    #[error("airflow api error: {status} {body}")]
    Api { status: StatusCode, body: String },

    /// Transport-level failure (connect, timeout, body decode).
    #[error("airflow request failed: {0}")]
    Http(#[from] reqwest::Error),
}
