use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

/// Consecutive fully-completed days ending today.
///
/// Today only counts once it is complete; until then the streak runs up to
/// yesterday so an unfinished morning does not reset it.
pub fn compute_streak(complete_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut day = if complete_days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while complete_days.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}
