//! Authenticated access to the Airflow REST API.
//!
//! Airflow hands out short-lived bearer tokens in exchange for credentials.
//! Tokens are never cached: every interaction acquires a fresh one and opens
//! a [`DagRunApi`] session that lives for exactly one logical call before it
//! is dropped.

use std::future::Future;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::AirflowConfig;
use crate::dag_run::{DagRun, DagRunCollection, TriggerDagRunBody};
use crate::error::AirflowError;

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

/// The operations the inference layer needs from the orchestrator.
///
/// [`AuthnAirflowClient`] is the production implementation; tests substitute
/// in-memory fakes.
pub trait DagRunGateway {
    fn trigger_dag_run(
        &self,
        dag_id: &str,
        body: TriggerDagRunBody,
    ) -> impl Future<Output = Result<DagRun, AirflowError>> + Send;

    fn get_dag_run(
        &self,
        dag_id: &str,
        dag_run_id: &str,
    ) -> impl Future<Output = Result<DagRun, AirflowError>> + Send;

    fn list_dag_runs(
        &self,
        dag_id: &str,
        state: Option<&str>,
    ) -> impl Future<Output = Result<Vec<DagRun>, AirflowError>> + Send;
}

/// Airflow client that authenticates per interaction.
#[derive(Debug, Clone)]
pub struct AuthnAirflowClient {
    http: Client,
    config: AirflowConfig,
}

impl AuthnAirflowClient {
    pub fn new(config: AirflowConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Airflow's token endpoint answers 201 on success; anything else is an
    /// authentication failure.
    async fn access_token(&self) -> Result<String, AirflowError> {
        let url = format!("{}/auth/token", self.config.host);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "username": self.config.username,
                "password": self.config.password,
            }))
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            return Err(AirflowError::Auth {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let token: AccessTokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Acquire a token and open a single-use API session.
    ///
    /// Dropping the session is the only release step.
    pub async fn session(&self) -> Result<DagRunApi<'_>, AirflowError> {
        let token = self.access_token().await?;
        Ok(DagRunApi {
            http: &self.http,
            host: &self.config.host,
            token,
        })
    }
}

impl DagRunGateway for AuthnAirflowClient {
    async fn trigger_dag_run(
        &self,
        dag_id: &str,
        body: TriggerDagRunBody,
    ) -> Result<DagRun, AirflowError> {
        self.session().await?.trigger_dag_run(dag_id, body).await
    }

    async fn get_dag_run(&self, dag_id: &str, dag_run_id: &str) -> Result<DagRun, AirflowError> {
        self.session().await?.get_dag_run(dag_id, dag_run_id).await
    }

    async fn list_dag_runs(
        &self,
        dag_id: &str,
        state: Option<&str>,
    ) -> Result<Vec<DagRun>, AirflowError> {
        self.session().await?.list_dag_runs(dag_id, state).await
    }
}

/// A one-shot authenticated view of the DAG-run API.
#[derive(Debug)]
pub struct DagRunApi<'c> {
    http: &'c Client,
    host: &'c str,
    token: String,
}

impl DagRunApi<'_> {
    fn runs_url(&self, dag_id: &str) -> String {
        format!("{}/api/v2/dags/{dag_id}/dagRuns", self.host)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AirflowError> {
        if !response.status().is_success() {
            return Err(AirflowError::Api {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }

    pub async fn trigger_dag_run(
        &self,
        dag_id: &str,
        body: TriggerDagRunBody,
    ) -> Result<DagRun, AirflowError> {
        tracing::info!(dag_id, dag_run_id = %body.dag_run_id, "triggering dag run");
        let response = self
            .http
            .post(self.runs_url(dag_id))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn get_dag_run(
        &self,
        dag_id: &str,
        dag_run_id: &str,
    ) -> Result<DagRun, AirflowError> {
        let url = format!("{}/{dag_run_id}", self.runs_url(dag_id));
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        Self::decode(response).await
    }

    pub async fn list_dag_runs(
        &self,
        dag_id: &str,
        state: Option<&str>,
    ) -> Result<Vec<DagRun>, AirflowError> {
        let mut request = self.http.get(self.runs_url(dag_id)).bearer_auth(&self.token);
        if let Some(state) = state {
            request = request.query(&[("state", state)]);
        }
        let collection: DagRunCollection = Self::decode(request.send().await?).await?;
        Ok(collection.dag_runs)
    }
}
