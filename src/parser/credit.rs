use anyhow::{bail, Context};
use itertools::Itertools;
use jwch_utils::selector;
use scraper::Html;

use crate::schema::CreditStatistic;

use super::{cells, trimmed_text};

/// Each statistics table has three rows: categories, required credits and earned
/// credits. The last table is a legend.
pub fn parse_credit_statistics(html: &Html) -> anyhow::Result<Vec<CreditStatistic>> {
    let span = html
        .select(selector!("#ContentPlaceHolder1_LB_kb"))
        .next()
        .context("Credit statistics not found")?;
    let tables = span.select(selector!("table")).collect_vec();
    let Some((_legend, tables)) = tables.split_last() else {
        bail!("Credit statistics have no table");
    };

    let mut statistics = vec![];
    for table in tables {
        // The third row has an extra "查" link cell.
        let rows = table
            .select(selector!("tr"))
            .take(3)
            .map(|row| {
                cells(row)
                    .into_iter()
                    .map(trimmed_text)
                    .filter(|text| text != "查")
                    .collect_vec()
            })
            .collect_vec();
        let [kinds, totals, gains] = &rows[..] else {
            bail!("A credit table has {} rows", rows.len());
        };
        let cell = |row: &[String], i: usize| row.get(i).cloned().unwrap_or_default();
        statistics.extend(
            kinds
                .iter()
                .enumerate()
                // The first column belongs to the student, and `修习情况` is not a category.
                .filter(|(_, kind)| !kind.is_empty() && !kind.contains("情况"))
                .map(|(i, kind)| CreditStatistic {
                    kind: kind.clone(),
                    gain: cell(gains, i),
                    total: cell(totals, i),
                }),
        );
    }
    Ok(statistics)
}
