use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::model::member::MemberRecord;

/// Returns the ids of members eligible for inactivity removal.
///
/// A member is inactive when they are no longer pending verification and at least
/// `threshold` has passed since they were last seen. Each id appears at most once;
/// order is unspecified.
pub fn evaluate(snapshot: &[MemberRecord], now: DateTime<Utc>, threshold: Duration) -> Vec<u64> {
    let mut seen = HashSet::new();

    snapshot
        .iter()
        .filter(|record| !record.pending_verification)
        .filter(|record| now - record.last_seen_at >= threshold)
        .map(|record| record.member_id)
        .filter(|id| seen.insert(*id))
        .collect()
}
