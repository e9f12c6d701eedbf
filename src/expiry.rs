use time::{Duration, OffsetDateTime};

/// Describes how long until `renew_after`, bucketed by the largest whole unit.
///
/// Produces `"<N> days"`, `"<N> hours"` or `"<N> minutes"`. Units are always
/// plural. A renewal time that has already passed, or is less than a minute
/// away, reads `"0 minutes"`.
#[must_use]
pub fn describe_remaining(renew_after: OffsetDateTime, now: OffsetDateTime) -> String {
    describe_duration(renew_after - now)
}

/// Same bucketing as [`describe_remaining`] for an already computed duration.
#[must_use]
pub fn describe_duration(remaining: Duration) -> String {
    if remaining.whole_days() > 0 {
        return format!("{} days", remaining.whole_days());
    }
    if remaining.whole_hours() > 0 {
        return format!("{} hours", remaining.whole_hours());
    }
    format!("{} minutes", remaining.whole_minutes().max(0))
}
