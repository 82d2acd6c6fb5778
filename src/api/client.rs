//! reqwest-based client for the patient-record REST API

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiError, PatientApi};
use crate::state::{Diagnosis, Entry, Patient};

/// Default API base URL
const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Client for the patient-record API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the given base URL
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve the base URL from `MEDREC_API_URL`, then the given
    /// config value, then the default
    pub fn resolve_base_url(configured: Option<&str>) -> String {
        std::env::var("MEDREC_API_URL")
            .ok()
            .or_else(|| configured.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        Ok(Self::check_status(response).await?.json().await?)
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        Ok(Self::check_status(response).await?.json().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PatientApi for ApiClient {
    async fn fetch_diagnoses(&self) -> Result<Vec<Diagnosis>, ApiError> {
        self.get("diagnosis").await
    }

    async fn fetch_patient(&self, id: &str) -> Result<Patient, ApiError> {
        self.get(&format!("patients/{id}")).await
    }

    async fn add_entry(&self, patient_id: &str, entry: &Entry) -> Result<Patient, ApiError> {
        self.post(&format!("patients/{patient_id}/entries"), entry)
            .await
    }
}
