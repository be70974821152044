use anyhow::bail;
use itertools::Itertools;
use jwch_utils::selector;
use scraper::Html;

use crate::schema::ExamRoomInfo;

use super::{cells, trimmed_text};

pub fn parse_room_types(html: &Html) -> Vec<String> {
    html.select(selector!("#jslxdpl option"))
        .map(trimmed_text)
        .collect()
}

pub fn parse_empty_rooms(html: &Html) -> Vec<String> {
    html.select(selector!("#jsdpl option"))
        .map(trimmed_text)
        .collect()
}

/// An absent table means there is no exam arranged yet.
pub fn parse_exam_rooms(html: &Html) -> anyhow::Result<Vec<ExamRoomInfo>> {
    let Some(table) = html
        .select(selector!("#ContentPlaceHolder1_DataList_xxk"))
        .next()
    else {
        return Ok(vec![]);
    };
    table
        .select(selector!("tr[onmouseover]"))
        .map(|row| {
            let cells = cells(row);
            if cells.len() < 4 {
                bail!("An exam row has only {} cells", cells.len());
            }
            let (date, time, location) = split_date_time_location(&trimmed_text(cells[3]));
            Ok(ExamRoomInfo {
                course_name: trimmed_text(cells[0]),
                credit: trimmed_text(cells[1]),
                teacher: trimmed_text(cells[2]),
                date,
                time,
                location,
            })
        })
        .collect()
}

/// `2024-01-10 09:00-11:00 旗山东3-101` into its three parts.
fn split_date_time_location(s: &str) -> (String, String, String) {
    if s.is_empty() {
        return (String::new(), String::new(), "暂无考场数据".to_owned());
    }
    let mut fields = s.split_whitespace();
    let date = fields.next().unwrap_or_default().to_owned();
    let time = fields.next().unwrap_or_default().to_owned();
    (date, time, fields.join(" "))
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::{parse_empty_rooms, parse_exam_rooms, parse_room_types, split_date_time_location};

    #[test]
    fn options() {
        let html = Html::parse_document(
            r#"<select id="jslxdpl"><option>多媒体</option><option>智慧教室</option></select>
<select id="jsdpl"><option>西1-201</option><option>西1-202</option></select>"#,
        );
        assert_eq!(parse_room_types(&html), ["多媒体", "智慧教室"]);
        assert_eq!(parse_empty_rooms(&html), ["西1-201", "西1-202"]);
    }

    #[test]
    fn exam_rooms() {
        let html = Html::parse_document(
            r#"<table id="ContentPlaceHolder1_DataList_xxk">
<tr><td>课程名称</td></tr>
<tr onmouseover="x"><td>数据结构</td><td>3.0</td><td>张三</td><td>2024-01-10 09:00-11:00 旗山东3-101</td></tr>
<tr onmouseover="x"><td>体育</td><td>1.0</td><td>李四</td><td> </td></tr>
</table>"#,
        );
        let rooms = parse_exam_rooms(&html).unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].date, "2024-01-10");
        assert_eq!(rooms[0].time, "09:00-11:00");
        assert_eq!(rooms[0].location, "旗山东3-101");
        assert_eq!(rooms[1].location, "暂无考场数据");
        assert!(parse_exam_rooms(&Html::parse_document("<p></p>"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn partial_arrangement() {
        assert_eq!(
            split_date_time_location("2024-01-10"),
            ("2024-01-10".to_owned(), String::new(), String::new())
        );
    }
}
