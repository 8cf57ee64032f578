use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::config::Settings;
use crate::core::{can_donate_to, compatible_donors_for, screening, Matcher, ScreeningThresholds};
use crate::models::{
    BloodType, CompatibilityResponse, DonationRequest, EligibilityQuestionnaire,
    ErrorResponse, HealthResponse, RegisterDonorRequest, RequestStatus, SearchDonorsRequest,
    SearchDonorsResponse, SearchQuery, UpdateDonorRequest,
};
use crate::services::{DonorRegistry, RegistryError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<DonorRegistry>,
    pub matcher: Matcher,
    pub screening: ScreeningThresholds,
    pub default_limit: u16,
    pub max_limit: u16,
}

impl AppState {
    pub fn new(registry: Arc<DonorRegistry>, settings: &Settings) -> Self {
        Self {
            registry,
            matcher: Matcher::new(settings.eligibility, settings.matching.missing_distance),
            screening: settings.screening,
            default_limit: settings.matching.default_limit,
            max_limit: settings.matching.max_limit,
        }
    }
}

/// Configure all donor-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/donors", web::post().to(register_donor))
        .route("/donors/search", web::post().to(search_donors))
        .route("/donors/{id}", web::get().to(get_donor))
        .route("/donors/{id}", web::patch().to(update_donor))
        .route("/compatibility/{blood_type}", web::get().to(compatibility))
        .route("/eligibility/check", web::post().to(check_eligibility))
        .route("/requests/match", web::post().to(match_request));
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn donor_not_found(id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Donor not found".to_string(),
        message: format!("No donor with id {}", id),
        status_code: 404,
    })
}

/// Run a query against a fresh registry snapshot and cap the result
fn run_search(state: &AppState, query: &SearchQuery, limit: usize) -> SearchDonorsResponse {
    let snapshot = state.registry.snapshot();
    let matches = state.matcher.find_matches(&snapshot, query, Utc::now());
    let total_results = matches.len();

    SearchDonorsResponse {
        donors: matches.into_iter().take(limit).cloned().collect(),
        total_results,
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        donors: state.registry.len(),
        timestamp: Utc::now(),
    })
}

/// Search donors endpoint
///
/// POST /api/v1/donors/search
///
/// Request body:
/// ```json
/// {
///   "bloodType": "A+",
///   "organType": "Kidney",
///   "location": "San Francisco",
///   "maxDistance": 25,
///   "donationType": "whole_blood",
///   "limit": 20
/// }
/// ```
async fn search_donors(
    state: web::Data<AppState>,
    req: web::Json<SearchDonorsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let req = req.into_inner();
    let limit = req.limit.unwrap_or(state.default_limit).min(state.max_limit) as usize;

    let query = SearchQuery {
        blood_type: req.blood_type,
        organ_type: req.organ_type,
        location: req.location,
        max_distance_km: req.max_distance,
        donation_type: req.donation_type,
    };

    tracing::info!(
        "Searching donors: bloodType={:?}, organType={:?}, location={}, maxDistance={:?}",
        query.blood_type,
        query.organ_type,
        query.location,
        query.max_distance_km
    );

    let response = run_search(&state, &query, limit);

    tracing::info!(
        "Returning {} donors (from {} matches)",
        response.donors.len(),
        response.total_results
    );

    HttpResponse::Ok().json(response)
}

/// Register donor endpoint
///
/// POST /api/v1/donors
async fn register_donor(
    state: web::Data<AppState>,
    req: web::Json<RegisterDonorRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for registration: field_errors={:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let record = req.into_inner().into_record();

    match state.registry.register(record.clone()) {
        Ok(()) => {
            tracing::info!(
                "Registered donor {} in {}, {} (organ donor: {})",
                record.id,
                record.city,
                record.state,
                record.is_organ_donor()
            );
            HttpResponse::Created().json(record)
        }
        Err(RegistryError::DuplicateId(id)) => {
            tracing::warn!("Duplicate donor id on registration: {}", id);
            HttpResponse::Conflict().json(ErrorResponse {
                error: "Donor already registered".to_string(),
                message: format!("A donor with id {} already exists", id),
                status_code: 409,
            })
        }
        Err(e) => {
            tracing::error!("Failed to register donor: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to register donor".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Fetch a single donor
///
/// GET /api/v1/donors/{id}
async fn get_donor(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.registry.get(&id) {
        Some(donor) => HttpResponse::Ok().json(donor),
        None => donor_not_found(&id),
    }
}

/// Update a donor's availability or pledged organs
///
/// PATCH /api/v1/donors/{id}
///
/// Request body (both fields optional):
/// ```json
/// { "available": false, "organs": ["Kidney"] }
/// ```
async fn update_donor(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateDonorRequest>,
) -> impl Responder {
    let id = path.into_inner();

    if req.is_empty() {
        return bad_request(
            "Validation failed",
            "Provide available or organs to update".to_string(),
        );
    }

    match state.registry.update(&id, |donor| req.apply(donor)) {
        Ok(donor) => {
            tracing::info!(
                "Updated donor {}: available={}, organ donor={}",
                donor.id,
                donor.available,
                donor.is_organ_donor()
            );
            HttpResponse::Ok().json(donor)
        }
        Err(RegistryError::NotFound(id)) => donor_not_found(&id),
        Err(e) => {
            tracing::error!("Failed to update donor {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to update donor".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Compatibility lookup
///
/// GET /api/v1/compatibility/{bloodType}
async fn compatibility(path: web::Path<String>) -> impl Responder {
    let blood_type = match path.parse::<BloodType>() {
        Ok(t) => t,
        Err(e) => return bad_request("Invalid blood type", e.to_string()),
    };

    HttpResponse::Ok().json(CompatibilityResponse {
        blood_type,
        can_receive_from: compatible_donors_for(blood_type).to_vec(),
        can_donate_to: can_donate_to(blood_type).to_vec(),
    })
}

/// Screening questionnaire
///
/// POST /api/v1/eligibility/check
async fn check_eligibility(
    state: web::Data<AppState>,
    req: web::Json<EligibilityQuestionnaire>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let assessment = screening::assess(&req, &state.screening, state.matcher.rules(), Utc::now());

    tracing::debug!(
        "Eligibility check: eligible={}, reasons={}",
        assessment.eligible,
        assessment.reasons.len()
    );

    HttpResponse::Ok().json(assessment)
}

/// Match donors against a hospital request
///
/// POST /api/v1/requests/match
async fn match_request(
    state: web::Data<AppState>,
    req: web::Json<DonationRequest>,
) -> impl Responder {
    if req.status != RequestStatus::Open {
        tracing::info!("Request {} is {:?}; not matching", req.id, req.status);
        return HttpResponse::Conflict().json(ErrorResponse {
            error: "Request closed".to_string(),
            message: format!("Request {} is no longer open", req.id),
            status_code: 409,
        });
    }

    if req.blood_type.is_none() && req.organ_type.is_none() {
        return bad_request(
            "Validation failed",
            "A request needs a blood type or an organ type".to_string(),
        );
    }

    let query = SearchQuery::from(&*req);
    let response = run_search(&state, &query, state.default_limit as usize);

    tracing::info!(
        "Request {} ({:?}, {}) matched {} donors",
        req.id,
        req.urgency,
        req.hospital,
        response.total_results
    );

    HttpResponse::Ok().json(response)
}
