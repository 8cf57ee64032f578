use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// ABO/Rh blood group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown blood type: {0:?}")]
pub struct ParseBloodTypeError(pub String);

impl FromStr for BloodType {
    type Err = ParseBloodTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        BloodType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ParseBloodTypeError(s.to_string()))
    }
}

/// Organ or tissue a donor has pledged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrganType {
    Kidney,
    Liver,
    Heart,
    Lungs,
    Pancreas,
    Intestines,
    Corneas,
    Tissue,
}

impl OrganType {
    pub const ALL: [OrganType; 8] = [
        OrganType::Kidney,
        OrganType::Liver,
        OrganType::Heart,
        OrganType::Lungs,
        OrganType::Pancreas,
        OrganType::Intestines,
        OrganType::Corneas,
        OrganType::Tissue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrganType::Kidney => "Kidney",
            OrganType::Liver => "Liver",
            OrganType::Heart => "Heart",
            OrganType::Lungs => "Lungs",
            OrganType::Pancreas => "Pancreas",
            OrganType::Intestines => "Intestines",
            OrganType::Corneas => "Corneas",
            OrganType::Tissue => "Tissue",
        }
    }
}

impl fmt::Display for OrganType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown organ type: {0:?}")]
pub struct ParseOrganTypeError(pub String);

impl FromStr for OrganType {
    type Err = ParseOrganTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        OrganType::ALL
            .iter()
            .copied()
            .find(|o| o.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseOrganTypeError(s.to_string()))
    }
}

/// Kind of donation; selects the recovery interval used for eligibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationType {
    #[default]
    WholeBlood,
    Platelets,
    Plasma,
    DoubleRedCells,
}

/// Donor record as held by the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorRecord {
    pub id: String,
    pub name: String,
    pub age: u8,
    #[serde(rename = "bloodType")]
    pub blood_type: BloodType,
    #[serde(default)]
    pub organs: Vec<OrganType>,
    #[serde(rename = "lastDonation", default)]
    pub last_donation: Option<DateTime<Utc>>,
    pub city: String,
    pub state: String,
    #[serde(default = "default_true")]
    pub available: bool,
    /// Kilometres from the searcher, computed outside this crate
    #[serde(rename = "distanceKm", default)]
    pub distance_km: Option<f64>,
}

impl DonorRecord {
    pub fn is_organ_donor(&self) -> bool {
        !self.organs.is_empty()
    }

    pub fn pledges(&self, organ: OrganType) -> bool {
        self.organs.contains(&organ)
    }
}

fn default_true() -> bool { true }

/// Donor search parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Blood type of the recipient
    #[serde(rename = "bloodType", default)]
    pub blood_type: Option<BloodType>,
    #[serde(rename = "organType", default)]
    pub organ_type: Option<OrganType>,
    /// City or state fragment
    pub location: String,
    #[serde(rename = "maxDistanceKm", default)]
    pub max_distance_km: Option<f64>,
    #[serde(rename = "donationType", default)]
    pub donation_type: Option<DonationType>,
}

impl SearchQuery {
    pub fn in_location(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn with_blood_type(mut self, blood_type: BloodType) -> Self {
        self.blood_type = Some(blood_type);
        self
    }

    pub fn with_organ(mut self, organ: OrganType) -> Self {
        self.organ_type = Some(organ);
        self
    }

    pub fn within_km(mut self, max_distance_km: f64) -> Self {
        self.max_distance_km = Some(max_distance_km);
        self
    }

    pub fn for_donation(mut self, donation_type: DonationType) -> Self {
        self.donation_type = Some(donation_type);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    Normal,
    Urgent,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Open,
    Matched,
    Completed,
}

/// Hospital request for blood or an organ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRequest {
    pub id: String,
    #[serde(rename = "bloodType", default)]
    pub blood_type: Option<BloodType>,
    #[serde(rename = "organType", default)]
    pub organ_type: Option<OrganType>,
    pub urgency: Urgency,
    pub hospital: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub status: RequestStatus,
}

impl From<&DonationRequest> for SearchQuery {
    fn from(request: &DonationRequest) -> Self {
        SearchQuery {
            blood_type: request.blood_type,
            organ_type: request.organ_type,
            location: request.city.clone(),
            max_distance_km: None,
            donation_type: None,
        }
    }
}

/// Policy for donors whose distance from the searcher is unknown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDistance {
    /// Unknown distance counts as 0 km, so it passes every bound and ranks first
    #[default]
    TreatAsZero,
    /// Unknown distance fails every bound and ranks last
    Exclude,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_type_parse() {
        assert_eq!("AB-".parse::<BloodType>().unwrap(), BloodType::AbNegative);
        assert_eq!(" o+ ".parse::<BloodType>().unwrap(), BloodType::OPositive);
        assert!("C+".parse::<BloodType>().is_err());
        assert!("".parse::<BloodType>().is_err());
    }

    #[test]
    fn test_blood_type_serde_names() {
        let json = serde_json::to_string(&BloodType::ONegative).unwrap();
        assert_eq!(json, "\"O-\"");

        let parsed: BloodType = serde_json::from_str("\"AB+\"").unwrap();
        assert_eq!(parsed, BloodType::AbPositive);

        assert!(serde_json::from_str::<BloodType>("\"unknown\"").is_err());
    }

    #[test]
    fn test_organ_type_parse() {
        assert_eq!("kidney".parse::<OrganType>().unwrap(), OrganType::Kidney);
        assert!("spleen".parse::<OrganType>().is_err());
    }

    #[test]
    fn test_request_to_query() {
        let request = DonationRequest {
            id: "1".to_string(),
            blood_type: Some(BloodType::APositive),
            organ_type: None,
            urgency: Urgency::Urgent,
            hospital: "UCSF Medical Center".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            created_at: Utc::now(),
            status: RequestStatus::Open,
        };

        let query = SearchQuery::from(&request);
        assert_eq!(query.blood_type, Some(BloodType::APositive));
        assert_eq!(query.location, "San Francisco");
        assert_eq!(query.max_distance_km, None);
    }
}
