//! Pure functions from fetched pages to [`crate::schema`] records.

pub mod calendar;
pub mod course;
pub mod credit;
pub mod gpa;
pub mod lecture;
pub mod mark;
pub mod notice;
pub mod room;
pub mod user;

use anyhow::Context;
use jwch_utils::selector;
use scraper::{ElementRef, Html, Node};

use crate::schema::FormState;

/// Text of `element` in which every `<br>` becomes a newline.
pub fn inner_text_with_br(element: ElementRef) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}

pub fn trimmed_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Keeps CJK unified ideographs only, which strips markup residue such as `&nbsp;`.
pub fn chinese_characters(s: &str) -> String {
    s.chars().filter(|c| ('\u{4e00}'..='\u{9fa5}').contains(c)).collect()
}

/// Direct `<td>` children of a row, ignoring cells of nested tables.
pub fn cells(row: ElementRef) -> Vec<ElementRef> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "td")
        .collect()
}

/// Rows of a course-like data list: the two header rows and unstyled spacer rows are
/// skipped.
pub fn data_list_rows(html: &Html) -> Vec<ElementRef> {
    data_list_rows_after(html, 2)
}

pub fn data_list_rows_after(html: &Html, header_rows: usize) -> Vec<ElementRef> {
    html.select(selector!("#ContentPlaceHolder1_DataList_xxk > tbody > tr"))
        .skip(header_rows)
        .filter(|row| {
            row.value()
                .attr("style")
                .is_some_and(|style| !style.trim().is_empty())
        })
        .collect()
}

pub fn form_state(html: &Html) -> anyhow::Result<FormState> {
    let value = |selector| {
        html.select(selector)
            .next()
            .and_then(|e| e.value().attr("value"))
            .map(str::to_owned)
    };
    Ok(FormState {
        view_state: value(selector!("#__VIEWSTATE")).context("__VIEWSTATE not found")?,
        event_validation: value(selector!("#__EVENTVALIDATION"))
            .context("__EVENTVALIDATION not found")?,
    })
}

#[cfg(test)]
mod tests {
    use jwch_utils::selector;
    use scraper::Html;

    use super::{chinese_characters, data_list_rows, form_state, inner_text_with_br};

    #[test]
    fn br_becomes_newline() {
        let html = Html::parse_document(
            "<table><tr><td>08-16 星期5:7-8节 铜盘A508<br>01-16&nbsp;星期1:1-2节 <b>A</b><br/></td></tr></table>",
        );
        let td = html.select(selector!("td")).next().unwrap();
        assert_eq!(
            inner_text_with_br(td),
            "08-16 星期5:7-8节 铜盘A508\n01-16\u{a0}星期1:1-2节 A\n"
        );
    }

    #[test]
    fn chinese_only() {
        assert_eq!(chinese_characters("&nbsp;必修 (A)"), "必修");
    }

    #[test]
    fn rows_skip_headers_and_spacers() {
        let html = Html::parse_document(
            r#"<table id="ContentPlaceHolder1_DataList_xxk">
            <tr><td>header</td></tr>
            <tr style="x"><td>header</td></tr>
            <tr style="height:20px"><td>a</td></tr>
            <tr><td>spacer</td></tr>
            <tr style=" "><td>spacer</td></tr>
            <tr style="height:20px"><td>b</td></tr>
            </table>"#,
        );
        let texts: Vec<String> = data_list_rows(&html)
            .into_iter()
            .map(|row| row.text().collect())
            .collect();
        assert_eq!(texts, ["a", "b"]);
    }

    #[test]
    fn state() {
        let html = Html::parse_document(
            r#"<form><input id="__VIEWSTATE" value="vs"><input id="__EVENTVALIDATION" value="ev"></form>"#,
        );
        let state = form_state(&html).unwrap();
        assert_eq!(state.view_state, "vs");
        assert_eq!(state.event_validation, "ev");
        assert!(form_state(&Html::parse_document("<p></p>")).is_err());
    }
}
