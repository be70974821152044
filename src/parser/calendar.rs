use anyhow::{bail, Context};
use jwch_utils::{capture, regex, selector};
use scraper::Html;

use crate::schema::{CalTerm, CalTermEvent, CalTermEvents, LocateDate, SchoolCalendar};

pub fn parse_school_calendar(html: &Html) -> anyhow::Result<SchoolCalendar> {
    let text = html.root_element().text().collect::<String>();
    let current_term = capture!(r"当前学期：(\d{6})", &text, 1)
        .context("Current term not found")?
        .to_owned();
    let terms = html
        .select(selector!("select[name=xq] option"))
        .filter_map(|option| option.value().attr("value"))
        .map(parse_cal_term)
        .collect::<anyhow::Result<_>>()?;
    Ok(SchoolCalendar {
        current_term,
        terms,
    })
}

/// Splits `2024012024082620250117` into the term `202401` and its first and last days.
pub fn parse_cal_term(term_id: &str) -> anyhow::Result<CalTerm> {
    if term_id.len() != 22 || !term_id.bytes().all(|b| b.is_ascii_digit()) {
        bail!("Unexpected term id {term_id:?}");
    }
    let date = |s: &str| format!("{}-{}-{}", &s[0..4], &s[4..6], &s[6..8]);
    Ok(CalTerm {
        term_id: term_id.to_owned(),
        school_year: term_id[0..4].to_owned(),
        term: term_id[0..6].to_owned(),
        start_date: date(&term_id[6..14]),
        end_date: date(&term_id[14..22]),
    })
}

/// Events are listed in one cell as `<start>至<end>为<name>`, separated by `；`.
pub fn parse_term_events(term_id: &str, html: &Html) -> CalTermEvents {
    let detail = html
        .select(selector!("body > table"))
        .nth(1)
        .and_then(|table| table.select(selector!("tr")).next())
        .map(|row| row.text().collect::<String>().replace('\u{a0}', " "))
        .unwrap_or_default();
    let events = detail
        .split('；')
        .map(str::trim)
        .filter(|event| !event.is_empty())
        .map(|event| match event.split_once('为') {
            Some((span, name)) => match span.split_once('至') {
                Some((start, end)) => CalTermEvent {
                    name: name.trim().to_owned(),
                    start_date: start.trim().to_owned(),
                    end_date: end.trim().to_owned(),
                },
                None => CalTermEvent {
                    name: event.to_owned(),
                    start_date: String::new(),
                    end_date: String::new(),
                },
            },
            None => CalTermEvent {
                name: event.to_owned(),
                start_date: String::new(),
                end_date: String::new(),
            },
        })
        .collect();
    CalTermEvents {
        term_id: term_id.to_owned(),
        term: term_id.get(0..6).unwrap_or(term_id).to_owned(),
        school_year: term_id.get(0..4).unwrap_or(term_id).to_owned(),
        events,
    }
}

/// Reads the current week, year and term declared by the portal's date script.
pub fn parse_locate_date(script: &str) -> anyhow::Result<LocateDate> {
    let captures = regex!(
        r#"var week = "([0-9]+)";\s*//.*\s*var xn = "([0-9]{4})";\s*//.*\s*var xq = "([0-9]{2})";"#
    )
    .captures(script)
    .context("Current week not found")?;
    Ok(LocateDate {
        week: captures[1].to_owned(),
        year: captures[2].to_owned(),
        term: captures[3].to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::{parse_cal_term, parse_locate_date, parse_school_calendar, parse_term_events};

    #[test]
    fn calendar() {
        let html = Html::parse_document(
            r#"<html><body><center><div>当前学期：202401</div></center>
<form><select name="xq">
<option value="2024012024082620250117">2024-2025学年第一学期</option>
<option value="2023022024022620240705">2023-2024学年第二学期</option>
</select></form></body></html>"#,
        );
        let calendar = parse_school_calendar(&html).unwrap();
        assert_eq!(calendar.current_term, "202401");
        assert_eq!(calendar.terms.len(), 2);
        let term = &calendar.terms[0];
        assert_eq!(term.school_year, "2024");
        assert_eq!(term.term, "202401");
        assert_eq!(term.start_date, "2024-08-26");
        assert_eq!(term.end_date, "2025-01-17");
    }

    #[test]
    fn malformed_term() {
        assert!(parse_cal_term("202401").is_err());
        assert!(parse_cal_term("20240120240826202501１").is_err());
        assert!(parse_school_calendar(&Html::parse_document("<p>xl</p>")).is_err());
    }

    #[test]
    fn events() {
        let html = Html::parse_document(
            "<html><body><table><tr><td>head</td></tr></table>\
<table><tr><td>2024-08-26至2024-09-01为新生入学教育；&nbsp;2024-10-01至2024-10-07为国庆节放假；\
期末考试安排另行通知；</td></tr></table></body></html>",
        );
        let events = parse_term_events("2024012024082620250117", &html);
        assert_eq!(events.term, "202401");
        assert_eq!(events.school_year, "2024");
        let summary = events
            .events
            .iter()
            .map(|e| (e.name.as_str(), e.start_date.as_str(), e.end_date.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            [
                ("新生入学教育", "2024-08-26", "2024-09-01"),
                ("国庆节放假", "2024-10-01", "2024-10-07"),
                ("期末考试安排另行通知", "", ""),
            ]
        );
        assert!(parse_term_events("202401", &Html::parse_document(""))
            .events
            .is_empty());
    }

    #[test]
    fn locate_date() {
        let script = r#"
var week = "12";//当前周
var xn = "2024";//学年
var xq = "01";//学期
"#;
        let date = parse_locate_date(script).unwrap();
        assert_eq!(date.week, "12");
        assert_eq!(date.year, "2024");
        assert_eq!(date.term, "01");
        assert!(parse_locate_date(r#"var week = "";"#).is_err());
    }
}
