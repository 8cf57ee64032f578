//! Donor Match - blood and organ donor matching service
//!
//! This library provides the compatibility tables, donation eligibility rules
//! and the filter/rank pipeline that turns a donor search into an ordered list
//! of candidate donors.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compatible_donors_for, can_donate_to, is_eligible, EligibilityRules, Matcher};
pub use crate::models::{BloodType, DonationType, DonorRecord, MissingDistance, OrganType, SearchQuery};
pub use crate::services::DonorRegistry;
