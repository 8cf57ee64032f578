use std::cmp::Ordering;

use crate::core::filters::effective_distance;
use crate::models::{DonorRecord, MissingDistance};

/// Order donors by distance ascending, then by id
///
/// Donors excluded by the missing-distance policy sort after every donor with
/// a known distance.
pub fn rank_by_distance(donors: &mut [&DonorRecord], policy: MissingDistance) {
    donors.sort_by(|a, b| compare(a, b, policy));
}

fn compare(a: &DonorRecord, b: &DonorRecord, policy: MissingDistance) -> Ordering {
    let by_distance = match (effective_distance(a, policy), effective_distance(b, policy)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_distance.then_with(|| a.id.cmp(&b.id))
}
