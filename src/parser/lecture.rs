use anyhow::bail;
use jwch_utils::regex;
use scraper::{ElementRef, Html};

use crate::{schedule::tokenizer::safe_atoi, schema::Lecture};

use super::{cells, data_list_rows_after, trimmed_text};

/// Lectures the student signed up for. The list starts with a blank row, a title and the
/// column headers.
pub fn parse_lectures(html: &Html) -> anyhow::Result<Vec<Lecture>> {
    data_list_rows_after(html, 3)
        .into_iter()
        .map(parse_lecture)
        .collect()
}

fn parse_lecture(row: ElementRef) -> anyhow::Result<Lecture> {
    let cells = cells(row);
    if cells.len() < 7 {
        bail!("A lecture row has only {} cells", cells.len());
    }
    Ok(Lecture {
        category: trimmed_text(cells[0]),
        issue_number: safe_atoi(&trimmed_text(cells[1])),
        title: trimmed_text(cells[2]),
        speaker: trimmed_text(cells[3]),
        time: normalize_time(&trimmed_text(cells[4])),
        location: trimmed_text(cells[5]),
        attendance_status: trimmed_text(cells[6]),
    })
}

/// `2024-05-20\u{a0}\u{a0}15：00` to `2024-05-20 15:00`.
fn normalize_time(s: &str) -> String {
    match regex!(r"^(\d{4}-\d{2}-\d{2})\u{a0}\u{a0}(\d{2})：(\d{2})$").captures(s) {
        Some(c) => format!("{} {}:{}", &c[1], &c[2], &c[3]),
        None => s.to_owned(),
    }
}
