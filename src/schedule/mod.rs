//! Course-schedule text parsing.
//!
//! The schedule cell of a course row lists recurring meetings, one per line, and the
//! adjustment cell lists one-off reschedules. [`parse_course_row`] turns both into a
//! single ordered list of [`ScheduleRule`]s.

pub mod adjustment;
pub mod normalize;
pub mod reconcile;
pub mod rule_parser;
pub mod schema;
pub mod tokenizer;

use log::debug;
use thiserror::Error;

use self::{
    adjustment::parse_adjustment,
    normalize::normalize,
    reconcile::reconcile,
    rule_parser::{parse_schedule_line, ScheduleLine},
    tokenizer::lines,
};
pub use self::schema::{AdjustmentRule, ScheduleRule};

#[derive(PartialEq, Eq, Debug, Error)]
pub enum ScheduleParseError {
    #[error("Malformed adjustment line: {0:?}")]
    MalformedAdjustmentLine(String),
    #[error("Malformed schedule line: {0:?}")]
    MalformedScheduleLine(String),
}

/// Parses the schedule and adjustment cells of one course row.
///
/// Any malformed line fails the whole row. Rules that take place on neither odd nor even
/// weeks are dropped.
pub fn parse_course_row(
    raw_schedule: &str,
    raw_adjust: &str,
) -> Result<Vec<ScheduleRule>, ScheduleParseError> {
    let adjustments = lines(raw_adjust)
        .map(parse_adjustment)
        .collect::<Result<Vec<_>, _>>()?;

    let mut rules = vec![];
    for line in lines(raw_schedule) {
        match parse_schedule_line(line)? {
            ScheduleLine::FullWeek(expanded) => rules.extend(expanded),
            ScheduleLine::Standard(base) => rules.extend(reconcile(&base, &adjustments)),
        }
    }
    rules.retain(ScheduleRule::takes_place);
    debug!(
        "Parsed {} rules with {} adjustments",
        rules.len(),
        adjustments.len()
    );
    Ok(normalize(rules))
}

#[cfg(test)]
mod tests {
    use super::{parse_course_row, ScheduleParseError, ScheduleRule};

    fn summary(rules: &[ScheduleRule]) -> Vec<(u32, u32, u32, u32, &str, bool)> {
        rules
            .iter()
            .map(|r| {
                (
                    r.weekday(),
                    r.start_week(),
                    r.end_week(),
                    r.start_class(),
                    r.location().as_str(),
                    r.adjusted(),
                )
            })
            .collect()
    }

    #[test]
    fn plain_schedule() {
        let rules = parse_course_row(
            "05-18 星期1:3-4节 铜盘A110\n05-17 星期3:1-2节 铜盘A110\n05-17 星期5:3-4节 铜盘A110",
            "",
        )
        .unwrap();
        assert_eq!(
            summary(&rules),
            [
                (1, 5, 18, 3, "铜盘A110", false),
                (3, 5, 17, 1, "铜盘A110", false),
                (5, 5, 17, 3, "铜盘A110", false),
            ]
        );
    }

    #[test]
    fn with_adjustments() {
        let rules = parse_course_row(
            "01-16 星期3:5-6节 旗山西1-206\n\u{a0}\n01-16 星期2:3-4节 旗山东3-101",
            "06周 星期3:5-6节  调至  09周 星期1:7-8节  旗山西1-206\n4 周 星期2:3-4节  调至  05周 星期2:7-8节  旗山东3-101",
        )
        .unwrap();
        assert_eq!(
            summary(&rules),
            [
                (1, 9, 9, 7, "旗山西1-206", true),
                (2, 1, 3, 3, "旗山东3-101", false),
                (2, 5, 16, 3, "旗山东3-101", false),
                (2, 5, 5, 7, "旗山东3-101", true),
                (3, 1, 5, 5, "旗山西1-206", false),
                (3, 7, 16, 5, "旗山西1-206", false),
            ]
        );
    }

    #[test]
    fn adjustment_applies_only_to_matching_key() {
        let rules = parse_course_row(
            "01-16 星期1:1-2节 A\n01-16 星期1:3-4节 A",
            "08周 星期1:3-4节 调至 08周 星期6:3-4节 B",
        )
        .unwrap();
        assert_eq!(
            summary(&rules),
            [
                (1, 1, 16, 1, "A", false),
                (1, 1, 7, 3, "A", false),
                (1, 9, 16, 3, "A", false),
                (6, 8, 8, 3, "B", true),
            ]
        );
    }

    #[test]
    fn full_week_with_regular_lines() {
        let rules =
            parse_course_row("03周 星期1 - 04周 星期7\n05-16 星期2:1-2节(单) 铜盘A508", "")
                .unwrap();
        assert_eq!(rules.len(), 8);
        assert_eq!(rules.iter().filter(|r| r.from_full_week()).count(), 7);
        let regular = rules.iter().find(|r| !r.from_full_week()).unwrap();
        assert!(regular.single() && !regular.double());
        assert_eq!(regular.weekday(), 2);
    }

    #[test]
    fn empty_cells() {
        assert_eq!(parse_course_row("", ""), Ok(vec![]));
        assert_eq!(parse_course_row(" \n\u{a0}\n", "\n"), Ok(vec![]));
    }

    #[test]
    fn malformed_adjustment_fails_row() {
        assert_eq!(
            parse_course_row("01-16 星期1:1-2节 A", "99周 星期9:0-0节 调至 garbage"),
            Err(ScheduleParseError::MalformedAdjustmentLine(
                "99周 星期9:0-0节 调至 garbage".to_owned()
            ))
        );
    }

    #[test]
    fn rules_on_neither_parity_are_dropped() {
        let rules = parse_course_row("01-16 星期3:5-6节(单双) A", "").unwrap();
        assert!(rules.is_empty());

        let rules = parse_course_row(
            "01-16 星期3:5-6节(单双) A\n01-16 星期1:1-2节 B",
            "08周 星期3:5-6节 调至 09周 星期5:5-6节 C",
        )
        .unwrap();
        assert!(rules.iter().all(|r| r.single() || r.double()));
        assert_eq!(
            summary(&rules),
            [(1, 1, 16, 1, "B", false), (5, 9, 9, 5, "C", true)]
        );
    }

    #[test]
    fn malformed_schedule_fails_row() {
        assert_eq!(
            parse_course_row("01-16 星期1:1-2节 A\n01-16 星期1", ""),
            Err(ScheduleParseError::MalformedScheduleLine(
                "01-16 星期1".to_owned()
            ))
        );
    }
}
