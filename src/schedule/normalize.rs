use super::schema::ScheduleRule;

/// Orders rules by weekday, then start week, then start class.
///
/// Ties are broken by the remaining fields, so the output does not depend on the
/// input order. Equal rules are kept.
pub fn normalize(mut rules: Vec<ScheduleRule>) -> Vec<ScheduleRule> {
    rules.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    rules
}
