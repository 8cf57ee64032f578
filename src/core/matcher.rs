use chrono::{DateTime, Utc};

use crate::core::{
    eligibility::EligibilityRules,
    filters::{is_ready_to_donate, matches_location, matches_need, within_distance},
    ranking::rank_by_distance,
};
use crate::models::{DonorRecord, MissingDistance, SearchQuery};

/// Main matching orchestrator - implements the donor filtering pipeline
///
/// # Pipeline Stages
/// 1. Compatibility (blood type and/or organ)
/// 2. Availability and recovery interval
/// 3. Location
/// 4. Distance bound
/// 5. Ranking by distance
///
/// The matcher holds no donor state; every call runs against the slice it is
/// given and returns references into it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    rules: EligibilityRules,
    missing_distance: MissingDistance,
}

impl Matcher {
    pub fn new(rules: EligibilityRules, missing_distance: MissingDistance) -> Self {
        Self { rules, missing_distance }
    }

    pub fn rules(&self) -> &EligibilityRules {
        &self.rules
    }

    pub fn missing_distance(&self) -> MissingDistance {
        self.missing_distance
    }

    /// Find eligible, available, compatible donors for `query`
    ///
    /// # Arguments
    /// * `donors` - Snapshot of the registry
    /// * `query` - Search parameters
    /// * `today` - Reference time for the recovery interval
    ///
    /// # Returns
    /// Matching donors ordered by distance, then id. Empty when nothing matches.
    pub fn find_matches<'a>(
        &self,
        donors: &'a [DonorRecord],
        query: &SearchQuery,
        today: DateTime<Utc>,
    ) -> Vec<&'a DonorRecord> {
        if query.max_distance_km.is_some() && self.missing_distance == MissingDistance::TreatAsZero {
            let unknown = donors.iter().filter(|d| d.distance_km.is_none()).count();
            if unknown > 0 {
                tracing::debug!("{} donors without distance treated as 0 km", unknown);
            }
        }

        let mut matches: Vec<&DonorRecord> = donors
            .iter()
            // Stage 1: Blood type / organ
            .filter(|donor| matches_need(donor, query))
            // Stage 2: Availability and eligibility
            .filter(|donor| is_ready_to_donate(donor, query, &self.rules, today))
            // Stage 3: Location
            .filter(|donor| matches_location(donor, &query.location))
            // Stage 4: Distance
            .filter(|donor| within_distance(donor, query.max_distance_km, self.missing_distance))
            .collect();

        // Stage 5: Ranking
        rank_by_distance(&mut matches, self.missing_distance);

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodType, OrganType};
    use chrono::Duration;

    fn create_donor(id: &str, blood_type: BloodType, city: &str, distance: Option<f64>) -> DonorRecord {
        DonorRecord {
            id: id.to_string(),
            name: format!("Donor {}", id),
            age: 30,
            blood_type,
            organs: vec![],
            last_donation: None,
            city: city.to_string(),
            state: "CA".to_string(),
            available: true,
            distance_km: distance,
        }
    }

    #[test]
    fn test_universal_donor_matches() {
        let matcher = Matcher::default();
        let donors = vec![create_donor("a", BloodType::ONegative, "San Francisco", None)];
        let query = SearchQuery::in_location("San Francisco").with_blood_type(BloodType::APositive);

        let result = matcher.find_matches(&donors, &query, Utc::now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }

    #[test]
    fn test_unavailable_excluded() {
        let matcher = Matcher::default();
        let mut donor = create_donor("a", BloodType::ONegative, "San Francisco", None);
        donor.available = false;
        let donors = vec![donor];
        let query = SearchQuery::in_location("San Francisco").with_blood_type(BloodType::APositive);

        assert!(matcher.find_matches(&donors, &query, Utc::now()).is_empty());
    }

    #[test]
    fn test_recent_donor_excluded() {
        let matcher = Matcher::default();
        let today = Utc::now();
        let mut donor = create_donor("a", BloodType::ONegative, "San Francisco", None);
        donor.last_donation = Some(today - Duration::days(10));
        let donors = vec![donor];
        let query = SearchQuery::in_location("San Francisco").with_blood_type(BloodType::APositive);

        assert!(matcher.find_matches(&donors, &query, today).is_empty());
    }

    #[test]
    fn test_max_distance() {
        let matcher = Matcher::default();
        let donors = vec![
            create_donor("far", BloodType::OPositive, "San Jose", Some(7.5)),
            create_donor("near", BloodType::OPositive, "San Jose", Some(2.4)),
        ];
        let query = SearchQuery::in_location("san jose").within_km(5.0);

        let result = matcher.find_matches(&donors, &query, Utc::now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "near");
    }

    #[test]
    fn test_organ_query() {
        let matcher = Matcher::default();
        let mut kidney = create_donor("k", BloodType::ANegative, "Oakland", Some(1.0));
        kidney.organs = vec![OrganType::Kidney, OrganType::Liver];
        let donors = vec![kidney, create_donor("x", BloodType::ANegative, "Oakland", Some(0.5))];

        let query = SearchQuery::in_location("Oakland").with_organ(OrganType::Liver);
        let result = matcher.find_matches(&donors, &query, Utc::now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "k");
    }

    #[test]
    fn test_results_ranked_and_idempotent() {
        let matcher = Matcher::default();
        let donors = vec![
            create_donor("3", BloodType::OPositive, "Oakland", Some(5.2)),
            create_donor("1", BloodType::ONegative, "Oakland", Some(1.8)),
            create_donor("2", BloodType::OPositive, "Oakland", Some(1.8)),
        ];
        let query = SearchQuery::in_location("Oakland").with_blood_type(BloodType::OPositive);
        let today = Utc::now();

        let first = matcher.find_matches(&donors, &query, today);
        let second = matcher.find_matches(&donors, &query, today);

        let ids: Vec<&str> = first.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(first, second);
    }
}
