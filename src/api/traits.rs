//! Trait abstraction for the API client to enable mocking in tests

use async_trait::async_trait;

use super::ApiError;
use crate::state::{Diagnosis, Entry, Patient};

/// The network-fetch capability the app depends on. All three calls are
/// asynchronous and single-shot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientApi: Send + Sync {
    /// Fetch the diagnosis reference list
    async fn fetch_diagnoses(&self) -> Result<Vec<Diagnosis>, ApiError>;

    /// Fetch a patient with their stored entries
    async fn fetch_patient(&self, id: &str) -> Result<Patient, ApiError>;

    /// Submit a new entry; returns the updated patient
    async fn add_entry(&self, patient_id: &str, entry: &Entry) -> Result<Patient, ApiError>;
}
