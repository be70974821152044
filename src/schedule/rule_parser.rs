use jwch_utils::regex;

use super::{
    schema::ScheduleRule,
    tokenizer::{fields, safe_atoi},
    ScheduleParseError,
};

/// A parsed line of the schedule cell.
#[derive(PartialEq, Eq, Debug)]
pub enum ScheduleLine {
    /// An all-day block such as military training, already expanded per weekday.
    FullWeek(Vec<ScheduleRule>),
    /// A regular meeting that adjustments may still apply to.
    Standard(ScheduleRule),
}

/// Parses `08-16 星期5:7-8节 铜盘A508` or `03周 星期1 - 04周 星期7`.
pub fn parse_schedule_line(line: &str) -> Result<ScheduleLine, ScheduleParseError> {
    let malformed = || ScheduleParseError::MalformedScheduleLine(line.to_owned());

    // Both forms need three whitespace-separated fields, even though the full-week
    // pattern alone would accept `03周星期1-04周星期7`.
    let fields = fields(line);
    if fields.len() < 3 {
        return Err(malformed());
    }

    if let Some(captures) =
        regex!(r"^(\d{1,2})\s*周\s*星期(\d)\s*-\s*(\d{1,2})\s*周\s*星期(\d)$").captures(line)
    {
        let number = |i: usize| safe_atoi(&captures[i]);
        return Ok(ScheduleLine::FullWeek(expand_full_week(
            number(1),
            number(2),
            number(3),
            number(4),
        )));
    }

    let weeks = regex!(r"^(\d+)-(\d+)$")
        .captures(fields[0])
        .ok_or_else(malformed)?;
    let day = regex!(r"^星期(\d+):(\d+)-(\d+)节(.*)$")
        .captures(fields[1])
        .ok_or_else(malformed)?;
    let parity = &day[4];

    Ok(ScheduleLine::Standard(
        ScheduleRule::builder()
            .location(fields[2..].join(" "))
            .start_class(safe_atoi(&day[2]))
            .end_class(safe_atoi(&day[3]))
            .start_week(safe_atoi(&weeks[1]))
            .end_week(safe_atoi(&weeks[2]))
            .weekday(safe_atoi(&day[1]))
            .single(!parity.contains('双'))
            .double(!parity.contains('单'))
            .build(),
    ))
}

/// Expands `start_week`/`start_day` to `end_week`/`end_day` into one rule per weekday.
///
/// Weekdays before `start_day` only begin on the following week, and weekdays after
/// `end_day` stop one week early.
pub fn expand_full_week(
    start_week: u32,
    start_day: u32,
    end_week: u32,
    end_day: u32,
) -> Vec<ScheduleRule> {
    (1..=7)
        .filter_map(|weekday| {
            let first = start_week + u32::from(weekday < start_day);
            let last = if weekday > end_day {
                end_week.checked_sub(1)?
            } else {
                end_week
            };
            (first <= last).then(|| {
                ScheduleRule::builder()
                    .start_class(1)
                    .end_class(8)
                    .start_week(first)
                    .end_week(last)
                    .weekday(weekday)
                    .from_full_week(true)
                    .build()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::schedule::{schema::ScheduleRule, ScheduleParseError};

    use super::{parse_schedule_line, ScheduleLine};

    fn standard(line: &str) -> ScheduleRule {
        match parse_schedule_line(line) {
            Ok(ScheduleLine::Standard(rule)) => rule,
            other => panic!("unexpected result for {line:?}: {other:?}"),
        }
    }

    fn full_week(line: &str) -> Vec<ScheduleRule> {
        match parse_schedule_line(line) {
            Ok(ScheduleLine::FullWeek(rules)) => rules,
            other => panic!("unexpected result for {line:?}: {other:?}"),
        }
    }

    #[test]
    fn standard_line() {
        assert_eq!(
            standard("08-16 星期5:7-8节 铜盘A508"),
            ScheduleRule::builder()
                .location("铜盘A508")
                .start_class(7)
                .end_class(8)
                .start_week(8)
                .end_week(16)
                .weekday(5)
                .build()
        );
    }

    #[test]
    fn parity() {
        let rule = standard("02-14 星期1:1-2节(双) 旗山西1-206");
        assert!(!rule.single() && rule.double());
        let rule = standard("01-13 星期1:3-4节(单) 旗山西1-206");
        assert!(rule.single() && !rule.double());
        let rule = standard("05-18 星期1:3-4节 铜盘A110");
        assert!(rule.single() && rule.double());
    }

    #[test]
    fn location_with_spaces() {
        assert_eq!(
            standard("01-16 星期2:9-11节 旗山 东3-101").location(),
            "旗山 东3-101"
        );
    }

    #[test]
    fn full_week_covers_every_weekday() {
        let rules = full_week("03周 星期1 - 04周 星期7");
        assert_eq!(rules.len(), 7);
        for (rule, weekday) in rules.iter().zip(1..) {
            assert_eq!(rule.weekday(), weekday);
            assert_eq!((rule.start_week(), rule.end_week()), (3, 4));
            assert_eq!((rule.start_class(), rule.end_class()), (1, 8));
            assert!(rule.single() && rule.double() && rule.from_full_week());
            assert!(!rule.adjusted());
            assert_eq!(rule.location(), "");
        }
    }

    #[test]
    fn full_week_trims_boundaries() {
        // Wednesday of week 1 through Tuesday of week 3
        let weeks = full_week("01周 星期3 - 03周 星期2")
            .iter()
            .map(|r| (r.weekday(), r.start_week(), r.end_week()))
            .collect::<Vec<_>>();
        assert_eq!(
            weeks,
            [
                (1, 2, 3),
                (2, 2, 3),
                (3, 1, 2),
                (4, 1, 2),
                (5, 1, 2),
                (6, 1, 2),
                (7, 1, 2),
            ]
        );
    }

    #[test]
    fn full_week_within_one_week() {
        let weeks = full_week("05周 星期2 - 05周 星期4")
            .iter()
            .map(|r| (r.weekday(), r.start_week(), r.end_week()))
            .collect::<Vec<_>>();
        assert_eq!(weeks, [(2, 5, 5), (3, 5, 5), (4, 5, 5)]);
    }

    #[test]
    fn malformed() {
        for line in [
            "08-16 星期5:7-8节",
            "08-16",
            "第8周 星期5 铜盘A508",
            "08-16 周五:7-8节 铜盘A508",
            "03周 星期1 - 04周",
        ] {
            assert_eq!(
                parse_schedule_line(line),
                Err(ScheduleParseError::MalformedScheduleLine(line.to_owned())),
                "{line}"
            );
        }
    }

    #[test]
    fn compact_full_week_is_rejected() {
        let line = "03周星期1-04周星期7";
        assert_eq!(
            parse_schedule_line(line),
            Err(ScheduleParseError::MalformedScheduleLine(line.to_owned()))
        );
        assert_eq!(full_week("03周 星期1 -04周星期7").len(), 7);
    }

    #[test]
    fn both_parity_markers() {
        let rule = standard("01-16 星期3:5-6节(单双) A");
        assert!(!rule.single() && !rule.double());
    }
}
