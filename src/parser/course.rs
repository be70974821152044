use anyhow::{bail, Context};
use itertools::Itertools;
use jwch_utils::{capture, selector};
use scraper::{ElementRef, Html};

use crate::{
    constants::JWCH_PREFIX,
    schedule::{parse_course_row, tokenizer::lines},
    schema::{Course, TermList},
};

use super::{cells, chinese_characters, data_list_rows, form_state, inner_text_with_br, trimmed_text};

pub fn parse_terms(html: &Html) -> anyhow::Result<TermList> {
    let terms = html
        .select(selector!("#ContentPlaceHolder1_DDL_xnxq option"))
        .filter_map(|option| option.value().attr("value"))
        .map(str::to_owned)
        .collect_vec();
    if terms.is_empty() {
        bail!("No term was found");
    }
    Ok(TermList {
        terms,
        state: form_state(html)?,
    })
}

pub fn parse_courses(html: &Html) -> anyhow::Result<Vec<Course>> {
    data_list_rows(html).into_iter().map(parse_course).collect()
}

fn parse_course(row: ElementRef) -> anyhow::Result<Course> {
    let cells = cells(row);
    if cells.len() < 12 {
        bail!("A course row has only {} cells", cells.len());
    }

    let name = trimmed_text(cells[1]);
    let raw_schedule = lines(&inner_text_with_br(cells[8])).join("\n");
    let raw_adjust = lines(&inner_text_with_br(cells[11])).join("\n");
    let schedule_rules = parse_course_row(&raw_schedule, &raw_adjust)
        .with_context(|| format!("While parsing the schedule of {name}"))?;
    let mut links = cells[2]
        .select(selector!("a"))
        .map(|a| popup_url(a.value().attr("href").unwrap_or_default()));
    let credits = cells[4]
        .select(selector!("span"))
        .next()
        .map(trimmed_text)
        .unwrap_or_default();

    Ok(Course::builder()
        .kind(trimmed_text(cells[0]))
        .name(name)
        .syllabus_url(links.next().flatten())
        .lesson_plan_url(links.next().flatten())
        .credits(credits)
        .elective_type(chinese_characters(&trimmed_text(cells[5])))
        .exam_type(chinese_characters(&trimmed_text(cells[6])))
        .teacher(trimmed_text(cells[7]))
        .schedule_rules(schedule_rules)
        .raw_schedule_rules(raw_schedule)
        .raw_exam_time(trimmed_text(cells[9]))
        .raw_adjust(raw_adjust)
        .remark(trimmed_text(cells[10]))
        .build())
}

/// `javascript:pop1('/path?x=1&...')` to an absolute url.
fn popup_url(href: &str) -> Option<String> {
    capture!(r"javascript:pop1\('(.*?)&", href, 1).map(|path| format!("{JWCH_PREFIX}{path}"))
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::{parse_courses, parse_terms, popup_url};

    const COURSE_PAGE: &str = r#"<html><body>
<input id="__VIEWSTATE" value="vs"><input id="__EVENTVALIDATION" value="ev">
<select id="ContentPlaceHolder1_DDL_xnxq">
  <option value="202401">202401</option>
  <option value="202302">202302</option>
</select>
<table id="ContentPlaceHolder1_DataList_xxk">
<tr><td>修读类别</td></tr>
<tr style="background:#efefef"><td>课程名称</td></tr>
<tr style="height:30px">
  <td>主修</td>
  <td>数据结构</td>
  <td><a href="javascript:pop1('/pyfa/kcdg/kcdg_view.aspx?kcdm=1&amp;x=1');">大纲</a>
      <a href="javascript:pop1('/pyfa/skjh/skjh_view.aspx?kcdm=1&amp;x=1');">计划</a></td>
  <td>已缴费</td>
  <td><span>3.0</span></td>
  <td>&nbsp;必修</td>
  <td>考试 </td>
  <td>张三</td>
  <td>01-16 星期3:5-6节 旗山西1-206<br>01-16&nbsp;星期5:1-2节(单) 旗山西1-206</td>
  <td>2024-01-10 09:00-11:00 旗山东3-101</td>
  <td></td>
  <td>06周 星期3:5-6节&nbsp;&nbsp;调至&nbsp;&nbsp;09周 星期1:7-8节&nbsp;&nbsp;旗山西1-206</td>
</tr>
<tr><td colspan="12"></td></tr>
<tr style="height:30px">
  <td>主修</td><td>军事训练</td><td></td><td></td><td><span>2.0</span></td><td>必修</td><td>考查</td>
  <td>李四</td><td>03周 星期1 - 04周 星期7</td><td></td><td>集中</td><td></td>
</tr>
</table>
</body></html>"#;

    #[test]
    fn terms() {
        let terms = parse_terms(&Html::parse_document(COURSE_PAGE)).unwrap();
        assert_eq!(terms.terms(), &["202401", "202302"]);
        assert_eq!(terms.state().view_state, "vs");
        assert!(parse_terms(&Html::parse_document("<select></select>")).is_err());
    }

    #[test]
    fn courses() {
        let courses = parse_courses(&Html::parse_document(COURSE_PAGE)).unwrap();
        assert_eq!(courses.len(), 2);

        let course = &courses[0];
        assert_eq!(course.name(), "数据结构");
        assert_eq!(course.credits(), "3.0");
        assert_eq!(course.elective_type(), "必修");
        assert_eq!(course.exam_type(), "考试");
        assert_eq!(
            course.syllabus_url().as_deref(),
            Some("https://jwcjwxt2.fzu.edu.cn:81/pyfa/kcdg/kcdg_view.aspx?kcdm=1")
        );
        assert_eq!(
            course.raw_schedule_rules(),
            "01-16 星期3:5-6节 旗山西1-206\n01-16\u{a0}星期5:1-2节(单) 旗山西1-206"
        );
        let rules = course
            .schedule_rules()
            .iter()
            .map(|r| (r.weekday(), r.start_week(), r.end_week(), r.adjusted()))
            .collect::<Vec<_>>();
        assert_eq!(
            rules,
            [
                (1, 9, 9, true),
                (3, 1, 5, false),
                (3, 7, 16, false),
                (5, 1, 16, false),
            ]
        );

        let training = &courses[1];
        assert_eq!(training.syllabus_url(), &None);
        assert_eq!(training.schedule_rules().len(), 7);
        assert_eq!(training.remark(), "集中");
    }

    #[test]
    fn short_row() {
        let html = Html::parse_document(
            r#"<table id="ContentPlaceHolder1_DataList_xxk"><tr></tr><tr></tr>
            <tr style="a"><td>主修</td><td>数据结构</td></tr></table>"#,
        );
        assert!(parse_courses(&html).is_err());
    }

    #[test]
    fn popup() {
        assert_eq!(popup_url("#"), None);
    }
}
