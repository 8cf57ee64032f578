use serde::{Deserialize, Serialize};
use crate::models::domain::{BloodType, DonorRecord};

/// Response for the donor search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDonorsResponse {
    pub donors: Vec<DonorRecord>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Compatibility lookup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResponse {
    #[serde(rename = "bloodType")]
    pub blood_type: BloodType,
    #[serde(rename = "canReceiveFrom")]
    pub can_receive_from: Vec<BloodType>,
    #[serde(rename = "canDonateTo")]
    pub can_donate_to: Vec<BloodType>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub donors: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
