use anyhow::{bail, Context};
use jwch_utils::selector;
use scraper::{ElementRef, Html, Selector};

use crate::schema::{Mark, UnifiedExam};

use super::{cells, chinese_characters, data_list_rows, trimmed_text};

pub fn parse_marks(html: &Html) -> anyhow::Result<Vec<Mark>> {
    data_list_rows(html).into_iter().map(parse_mark).collect()
}

fn parse_mark(row: ElementRef) -> anyhow::Result<Mark> {
    let cells = cells(row);
    if cells.len() < 12 {
        bail!("A mark row has only {} cells", cells.len());
    }
    let first = |cell: ElementRef, selector: &Selector| {
        cell.select(selector)
            .next()
            .map(trimmed_text)
            .unwrap_or_default()
    };
    Ok(Mark {
        kind: trimmed_text(cells[0]),
        semester: trimmed_text(cells[1]),
        name: trimmed_text(cells[2]),
        credits: first(cells[3], selector!("span")),
        score: first(cells[4], selector!("font")),
        gpa: trimmed_text(cells[5]),
        earned_credits: trimmed_text(cells[6]),
        elective_type: chinese_characters(&trimmed_text(cells[7])),
        exam_type: chinese_characters(&trimmed_text(cells[8])),
        teacher: trimmed_text(cells[9]),
        classroom: trimmed_text(cells[10]),
        exam_time: trimmed_text(cells[11]),
    })
}

/// Parses the CET and computer-exam result pages, which share one layout.
///
/// Rows with fewer than three cells are skipped.
pub fn parse_unified_exams(html: &Html) -> anyhow::Result<Vec<UnifiedExam>> {
    let table = html
        .select(selector!("#ContentPlaceHolder1_DataList_xxk"))
        .next()
        .context("Exam table not found")?;
    Ok(table
        .select(selector!("tr[onmouseover]"))
        .filter_map(|row| {
            let cells = cells(row);
            (cells.len() >= 3).then(|| UnifiedExam {
                name: trimmed_text(cells[0]),
                term: trimmed_text(cells[1]),
                score: trimmed_text(cells[2]),
            })
        })
        .collect())
}
