use itertools::Itertools;

use super::schema::{AdjustmentRule, ScheduleRule};

/// Applies every adjustment that moves a week of `base`.
///
/// The weeks that moved away are cut out of `base`, leaving the residual ranges, and
/// each matching adjustment contributes its own single-week destination rule. When no
/// adjustment matches, `base` is returned as is.
pub fn reconcile(base: &ScheduleRule, adjustments: &[AdjustmentRule]) -> Vec<ScheduleRule> {
    let matched = adjustments
        .iter()
        .filter(|adjustment| adjustment.applies_to(base))
        .collect_vec();
    if matched.is_empty() {
        return vec![base.clone()];
    }

    let moved_weeks = matched
        .iter()
        .map(|adjustment| adjustment.old_week())
        .sorted()
        .dedup()
        .collect_vec();
    residual_ranges(base.start_week(), base.end_week(), &moved_weeks)
        .into_iter()
        .map(|(start, end)| base.with_weeks(start, end))
        .chain(matched.iter().map(|adjustment| adjustment.destination()))
        .collect()
}

/// Splits `start..=end` around `removed`, which must be sorted, distinct and in range.
pub fn residual_ranges(start: u32, end: u32, removed: &[u32]) -> Vec<(u32, u32)> {
    let mut ranges = vec![];
    let cursor = removed.iter().fold(start, |cursor, &week| {
        if week != cursor {
            ranges.push((cursor, week - 1));
        }
        week + 1
    });
    if cursor <= end {
        ranges.push((cursor, end));
    }
    ranges
}
