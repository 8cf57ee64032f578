use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::eligibility::{days_since, EligibilityRules};
use crate::models::EligibilityQuestionnaire;

/// Conditions that rule a donor out permanently
pub const PERMANENT_CONDITIONS: &[&str] = &["hiv", "hepatitis", "cancer"];

/// Conditions that rule a donor out until they resolve
pub const TEMPORARY_CONDITIONS: &[&str] = &["pregnancy", "surgery", "tattoo", "anemia"];

pub const ELIGIBLE_MESSAGE: &str = "You appear to be eligible to donate blood!";

/// Age and weight thresholds for the screening questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreeningThresholds {
    #[serde(default = "default_min_age")]
    pub min_age: u8,
    /// Donors above this age get an advisory note, not a refusal
    #[serde(default = "default_advisory_age")]
    pub advisory_age: u8,
    #[serde(default = "default_min_weight_kg")]
    pub min_weight_kg: f64,
}

fn default_min_age() -> u8 { 18 }
fn default_advisory_age() -> u8 { 65 }
fn default_min_weight_kg() -> f64 { 50.0 }

impl Default for ScreeningThresholds {
    fn default() -> Self {
        Self {
            min_age: default_min_age(),
            advisory_age: default_advisory_age(),
            min_weight_kg: default_min_weight_kg(),
        }
    }
}

/// Screening verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub eligible: bool,
    pub reasons: Vec<String>,
    /// Set when the last donation is too recent
    #[serde(rename = "nextEligibleDate", default, skip_serializing_if = "Option::is_none")]
    pub next_eligible_date: Option<DateTime<Utc>>,
}

/// Evaluate a screening questionnaire at `today`.
///
/// Unanswered questions never disqualify.
pub fn assess(
    questionnaire: &EligibilityQuestionnaire,
    thresholds: &ScreeningThresholds,
    rules: &EligibilityRules,
    today: DateTime<Utc>,
) -> EligibilityAssessment {
    let mut eligible = true;
    let mut reasons = Vec::new();
    let mut next_eligible_date = None;

    if let Some(age) = questionnaire.age {
        if age < thresholds.min_age {
            eligible = false;
            reasons.push(format!(
                "You must be at least {} years old to donate blood.",
                thresholds.min_age
            ));
        } else if age > thresholds.advisory_age {
            reasons.push(format!(
                "Donors above {} may require additional health screening.",
                thresholds.advisory_age
            ));
        }
    }

    if let Some(weight) = questionnaire.weight_kg {
        if weight < thresholds.min_weight_kg {
            eligible = false;
            reasons.push(format!(
                "Donors must weigh at least {}kg to donate blood.",
                thresholds.min_weight_kg
            ));
        }
    }

    if let Some(last) = questionnaire.last_donation {
        let donation_type = questionnaire.donation_type.unwrap_or_default();
        if !rules.is_eligible(Some(last), today, donation_type) {
            eligible = false;
            next_eligible_date = rules.next_eligible_date(Some(last), donation_type);
            let days = days_since(last, today);
            if days < 0 {
                reasons.push("Your last donation date is in the future.".to_string());
            } else {
                reasons.push(format!(
                    "Your last donation was {} days ago. You need to wait {} days between donations.",
                    days,
                    rules.interval_days(donation_type)
                ));
            }
        }
    }

    let conditions = &questionnaire.health_conditions;

    if has_any(conditions, PERMANENT_CONDITIONS) {
        eligible = false;
        reasons.push(
            "Some of your health conditions might permanently affect your eligibility to donate blood."
                .to_string(),
        );
    }

    if has_any(conditions, TEMPORARY_CONDITIONS) {
        eligible = false;
        reasons.push(
            "Some of your health conditions might temporarily affect your eligibility to donate blood."
                .to_string(),
        );
    }

    if has_any(conditions, &["medications"]) {
        reasons.push(
            "Please consult with donation center staff about your medications before donating."
                .to_string(),
        );
    }

    if reasons.is_empty() {
        reasons.push(ELIGIBLE_MESSAGE.to_string());
    }

    EligibilityAssessment { eligible, reasons, next_eligible_date }
}

fn has_any(conditions: &[String], set: &[&str]) -> bool {
    conditions.iter().any(|c| {
        let normalized = c.trim().to_ascii_lowercase();
        set.contains(&normalized.as_str())
    })
}
