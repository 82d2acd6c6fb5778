//! REST client module for the patient-record API

mod client;
mod traits;

use thiserror::Error;

pub use client::ApiClient;
pub use traits::PatientApi;

#[cfg(test)]
pub use traits::MockPatientApi;

/// Failure talking to the patient-record API. Every call site surfaces
/// these to the user; a failed fetch or submit is never silent.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout, or body decoding failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
}
