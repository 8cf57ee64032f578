use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::DonationType;

/// Minimum days between whole blood donations
pub const WHOLE_BLOOD_INTERVAL_DAYS: u32 = 56;
pub const PLATELETS_INTERVAL_DAYS: u32 = 7;
pub const PLASMA_INTERVAL_DAYS: u32 = 28;
pub const DOUBLE_RED_CELLS_INTERVAL_DAYS: u32 = 112;

/// Recovery intervals per donation type, in days.
///
/// Negative overrides fail to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRules {
    #[serde(default = "default_whole_blood")]
    pub whole_blood: u32,
    #[serde(default = "default_platelets")]
    pub platelets: u32,
    #[serde(default = "default_plasma")]
    pub plasma: u32,
    #[serde(default = "default_double_red_cells")]
    pub double_red_cells: u32,
}

fn default_whole_blood() -> u32 { WHOLE_BLOOD_INTERVAL_DAYS }
fn default_platelets() -> u32 { PLATELETS_INTERVAL_DAYS }
fn default_plasma() -> u32 { PLASMA_INTERVAL_DAYS }
fn default_double_red_cells() -> u32 { DOUBLE_RED_CELLS_INTERVAL_DAYS }

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            whole_blood: default_whole_blood(),
            platelets: default_platelets(),
            plasma: default_plasma(),
            double_red_cells: default_double_red_cells(),
        }
    }
}

impl EligibilityRules {
    pub fn interval_days(&self, donation_type: DonationType) -> i64 {
        let days = match donation_type {
            DonationType::WholeBlood => self.whole_blood,
            DonationType::Platelets => self.platelets,
            DonationType::Plasma => self.plasma,
            DonationType::DoubleRedCells => self.double_red_cells,
        };
        i64::from(days)
    }

    /// Whether a donor whose last donation was `last_donation` may give
    /// `donation_type` at `today`.
    ///
    /// Never donated is always eligible. A last donation in the future yields
    /// negative elapsed days and is ineligible.
    pub fn is_eligible(
        &self,
        last_donation: Option<DateTime<Utc>>,
        today: DateTime<Utc>,
        donation_type: DonationType,
    ) -> bool {
        match last_donation {
            None => true,
            Some(last) => days_since(last, today) >= self.interval_days(donation_type),
        }
    }

    /// Earliest moment a donor becomes eligible again, `None` if never donated
    pub fn next_eligible_date(
        &self,
        last_donation: Option<DateTime<Utc>>,
        donation_type: DonationType,
    ) -> Option<DateTime<Utc>> {
        last_donation.map(|last| last + Duration::days(self.interval_days(donation_type)))
    }
}

/// Whole days elapsed from `last` to `today`, rounded down.
///
/// Negative when `last` is after `today`.
#[inline]
pub fn days_since(last: DateTime<Utc>, today: DateTime<Utc>) -> i64 {
    let elapsed = today - last;
    let days = elapsed.num_days();
    // num_days truncates toward zero; floor partial negative days
    if elapsed < Duration::days(days) {
        days - 1
    } else {
        days
    }
}

/// Whole blood eligibility with the default 56 day interval
pub fn is_eligible(last_donation: Option<DateTime<Utc>>, today: DateTime<Utc>) -> bool {
    EligibilityRules::default().is_eligible(last_donation, today, DonationType::WholeBlood)
}
