use jwch_utils::regex;

use super::{schema::AdjustmentRule, tokenizer::safe_atoi, ScheduleParseError};

/// Parses one line such as `06周 星期3:5-6节  调至  09周 星期1:7-8节  旗山西1-206`.
///
/// The numbers are not range-checked.
pub fn parse_adjustment(line: &str) -> Result<AdjustmentRule, ScheduleParseError> {
    let captures = regex!(
        r"(\d{1,2})\s*周\s*星期(\d):(\d{1,2})-(\d{1,2})节\s*调至\s*(\d{1,2})\s*周\s*星期(\d):(\d{1,2})-(\d{1,2})节(.*)"
    )
    .captures(line)
    .ok_or_else(|| ScheduleParseError::MalformedAdjustmentLine(line.to_owned()))?;
    let number = |i: usize| safe_atoi(&captures[i]);

    Ok(AdjustmentRule::builder()
        .old_week(number(1))
        .old_weekday(number(2))
        .old_start_class(number(3))
        .old_end_class(number(4))
        .new_week(number(5))
        .new_weekday(number(6))
        .new_start_class(number(7))
        .new_end_class(number(8))
        .new_location(captures[9].trim())
        .build())
}
