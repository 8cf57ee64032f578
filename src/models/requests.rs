use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{BloodType, DonationType, DonorRecord, OrganType};

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^(\+?\d{1,4}?)?\d{7,14}$").unwrap();
    static ref ZIP_RE: Regex = Regex::new(r"^\d{5}(?:[-\s]\d{4})?$").unwrap();
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

fn validate_zip_code(zip: &str) -> Result<(), ValidationError> {
    if ZIP_RE.is_match(zip) {
        Ok(())
    } else {
        Err(ValidationError::new("zip_code"))
    }
}

// Whitespace-only would trim to "" and match every donor
fn validate_location(location: &str) -> Result<(), ValidationError> {
    if location.trim().is_empty() {
        Err(ValidationError::new("location"))
    } else {
        Ok(())
    }
}

/// Request to search the registry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchDonorsRequest {
    #[serde(alias = "blood_type", rename = "bloodType", default)]
    pub blood_type: Option<BloodType>,
    #[serde(alias = "organ_type", rename = "organType", default)]
    pub organ_type: Option<OrganType>,
    #[validate(custom(function = "validate_location", message = "Please enter a location"))]
    pub location: String,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_distance", rename = "maxDistance", default)]
    pub max_distance: Option<f64>,
    #[serde(alias = "donation_type", rename = "donationType", default)]
    pub donation_type: Option<DonationType>,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Donor registration form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDonorRequest {
    #[validate(length(min = 2, message = "First name must be at least 2 characters."))]
    #[serde(alias = "first_name", rename = "firstName")]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters."))]
    #[serde(alias = "last_name", rename = "lastName")]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(custom(function = "validate_phone", message = "Please enter a valid phone number."))]
    pub phone: String,
    #[validate(length(min = 5, message = "Address must be at least 5 characters."))]
    pub address: String,
    #[validate(length(min = 2, message = "City must be at least 2 characters."))]
    pub city: String,
    #[validate(length(min = 2, message = "State must be at least 2 characters."))]
    pub state: String,
    #[validate(custom(function = "validate_zip_code", message = "Please enter a valid ZIP code."))]
    #[serde(alias = "zip_code", rename = "zipCode")]
    pub zip_code: String,
    #[validate(range(min = 18, max = 120, message = "Donors must be between 18 and 120 years old."))]
    pub age: u8,
    #[serde(alias = "blood_type", rename = "bloodType")]
    pub blood_type: BloodType,
    #[serde(default)]
    pub organs: Vec<OrganType>,
    #[serde(alias = "last_donation", rename = "lastDonation", default)]
    pub last_donation: Option<DateTime<Utc>>,
    #[serde(alias = "additional_info", rename = "additionalInfo", default)]
    pub additional_info: Option<String>,
}

impl RegisterDonorRequest {
    /// Build the registry record for this registration under a fresh id
    pub fn into_record(self) -> DonorRecord {
        DonorRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name: format!("{} {}", self.first_name.trim(), self.last_name.trim()),
            age: self.age,
            blood_type: self.blood_type,
            organs: self.organs,
            last_donation: self.last_donation,
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            available: true,
            distance_km: None,
        }
    }
}

/// Donor-controlled changes to an existing record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDonorRequest {
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub organs: Option<Vec<OrganType>>,
}

impl UpdateDonorRequest {
    pub fn is_empty(&self) -> bool {
        self.available.is_none() && self.organs.is_none()
    }

    /// Apply the provided fields, leaving the rest untouched
    pub fn apply(&self, donor: &mut DonorRecord) {
        if let Some(available) = self.available {
            donor.available = available;
        }
        if let Some(organs) = &self.organs {
            donor.organs = organs.clone();
        }
    }
}

/// Screening questionnaire
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EligibilityQuestionnaire {
    #[validate(range(max = 130))]
    #[serde(default)]
    pub age: Option<u8>,
    #[validate(range(min = 0.0, max = 500.0))]
    #[serde(alias = "weight_kg", rename = "weightKg", default)]
    pub weight_kg: Option<f64>,
    #[serde(alias = "last_donation", rename = "lastDonation", default)]
    pub last_donation: Option<DateTime<Utc>>,
    #[serde(alias = "donation_type", rename = "donationType", default)]
    pub donation_type: Option<DonationType>,
    #[serde(alias = "health_conditions", rename = "healthConditions", default)]
    pub health_conditions: Vec<String>,
}
