// Core algorithm exports
pub mod compatibility;
pub mod eligibility;
pub mod filters;
pub mod matcher;
pub mod ranking;
pub mod screening;

pub use compatibility::{can_donate_to, compatible_donors_for, is_compatible};
pub use eligibility::{days_since, is_eligible, EligibilityRules};
pub use filters::{is_ready_to_donate, matches_location, matches_need, within_distance};
pub use matcher::Matcher;
pub use ranking::rank_by_distance;
pub use screening::{assess, EligibilityAssessment, ScreeningThresholds};
