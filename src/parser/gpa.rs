use anyhow::{bail, Context};
use itertools::Itertools;
use jwch_utils::selector;
use scraper::Html;

use crate::schema::{Gpa, GpaEntry};

use super::trimmed_text;

/// The ranking table is a grid of centered cells whose first row holds the headers.
pub fn parse_gpa(html: &Html) -> anyhow::Result<Gpa> {
    let time = html
        .select(selector!("#ContentPlaceHolder1_Label1"))
        .next()
        .map(trimmed_text)
        .context("GPA time label not found")?;
    let table = html
        .select(selector!("#ContentPlaceHolder1_DataList_xxk"))
        .next()
        .context("GPA table not found")?;

    let headers = table
        .select(selector!("tr"))
        .map(|row| {
            row.select(selector!("td[align=center]"))
                .map(trimmed_text)
                .collect_vec()
        })
        .find(|headers| !headers.is_empty())
        .context("GPA header row not found")?;
    let values = table
        .select(selector!("td[align=center]"))
        .map(trimmed_text)
        .collect_vec();
    if values.len() <= headers.len() {
        bail!("GPA table has no data cells");
    }

    let data = values
        .chunks_exact(headers.len())
        .skip(1)
        .flat_map(|row| {
            headers.iter().zip(row).map(|(kind, value)| GpaEntry {
                kind: kind.clone(),
                value: value.clone(),
            })
        })
        .collect();
    Ok(Gpa { time, data })
}
