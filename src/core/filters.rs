use chrono::{DateTime, Utc};

use crate::core::compatibility::is_compatible;
use crate::core::eligibility::EligibilityRules;
use crate::models::{DonorRecord, MissingDistance, SearchQuery};

/// Check blood type and organ constraints of the query
///
/// Blood type and organ are a conjunction when both are set.
#[inline]
pub fn matches_need(donor: &DonorRecord, query: &SearchQuery) -> bool {
    if let Some(recipient) = query.blood_type {
        if !is_compatible(donor.blood_type, recipient) {
            return false;
        }
    }

    if let Some(organ) = query.organ_type {
        if !donor.pledges(organ) {
            return false;
        }
    }

    true
}

/// Check that the donor is available and past the recovery interval
#[inline]
pub fn is_ready_to_donate(
    donor: &DonorRecord,
    query: &SearchQuery,
    rules: &EligibilityRules,
    today: DateTime<Utc>,
) -> bool {
    donor.available
        && rules.is_eligible(
            donor.last_donation,
            today,
            query.donation_type.unwrap_or_default(),
        )
}

/// Case-insensitive substring match of the query location against city or state
#[inline]
pub fn matches_location(donor: &DonorRecord, location: &str) -> bool {
    let needle = location.trim().to_lowercase();
    donor.city.to_lowercase().contains(&needle) || donor.state.to_lowercase().contains(&needle)
}

/// Distance used for bounds and ordering, `None` when the policy excludes the donor
#[inline]
pub fn effective_distance(donor: &DonorRecord, policy: MissingDistance) -> Option<f64> {
    match (donor.distance_km, policy) {
        (Some(d), _) => Some(d),
        (None, MissingDistance::TreatAsZero) => Some(0.0),
        (None, MissingDistance::Exclude) => None,
    }
}

#[inline]
pub fn within_distance(donor: &DonorRecord, max_distance_km: Option<f64>, policy: MissingDistance) -> bool {
    let Some(max) = max_distance_km else {
        return true;
    };

    match effective_distance(donor, policy) {
        Some(distance) => distance <= max,
        None => false,
    }
}
