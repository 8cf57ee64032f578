// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BloodType, DonationRequest, DonationType, DonorRecord, MissingDistance, OrganType,
    ParseBloodTypeError, ParseOrganTypeError, RequestStatus, SearchQuery, Urgency,
};
pub use requests::{
    EligibilityQuestionnaire, RegisterDonorRequest, SearchDonorsRequest, UpdateDonorRequest,
};
pub use responses::{CompatibilityResponse, ErrorResponse, HealthResponse, SearchDonorsResponse};
