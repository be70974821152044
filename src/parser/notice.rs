use anyhow::Context;
use jwch_utils::selector;
use scraper::Html;
use url::Url;

use crate::schema::Notice;

use super::trimmed_text;

/// Notices on a board page. Links are resolved against `page_url`.
pub fn parse_notices(html: &Html, page_url: &Url) -> anyhow::Result<Vec<Notice>> {
    let board = html
        .select(selector!("div.box-gl.clearfix"))
        .next()
        .context("Notice list not found")?;
    board
        .select(selector!("ul.list-gl > li"))
        .map(|item| {
            let date = item
                .select(selector!("span.doclist_time"))
                .next()
                .map(trimmed_text)
                .context("Notice date not found")?;
            let link = item
                .select(selector!("a"))
                .next()
                .context("Notice link not found")?;
            let href = link.value().attr("href").unwrap_or_default().trim();
            Ok(Notice {
                title: link.value().attr("title").unwrap_or_default().trim().to_owned(),
                url: page_url.join(href)?.into(),
                date,
            })
        })
        .collect()
}

/// The pager links its last page as `jxtz/1.htm`; the link text is the page count.
pub fn parse_total_pages(html: &Html) -> anyhow::Result<u32> {
    let text = html
        .select(selector!("span.p_pages a[href='jxtz/1.htm']"))
        .next()
        .map(trimmed_text)
        .context("Total page count not found")?;
    text.parse()
        .with_context(|| format!("Invalid total page count {text:?}"))
}

#[cfg(test)]
mod tests {
    use scraper::Html;
    use url::Url;

    use super::{parse_notices, parse_total_pages};

    const BOARD: &str = r#"<html><body>
<div class="box-gl clearfix"><ul class="list-gl">
<li><span class="doclist_time">2024-09-02</span>
  <a href="info/1040/13579.htm" title="关于2024年秋季学期补考安排的通知">关于2024年秋季学期...</a></li>
<li><span class="doclist_time"> 2024-08-30 </span>
  <a href="https://jwch.fzu.edu.cn/info/1040/13500.htm" title=" 选课通知 ">选课通知</a></li>
</ul></div>
<span class="p_pages"><a href="jxtz/2.htm">2</a><a href="jxtz/1.htm">187</a></span>
</body></html>"#;

    #[test]
    fn notices() {
        let page_url = Url::parse("https://jwch.fzu.edu.cn/jxtz.htm").unwrap();
        let notices = parse_notices(&Html::parse_document(BOARD), &page_url).unwrap();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].title, "关于2024年秋季学期补考安排的通知");
        assert_eq!(notices[0].url, "https://jwch.fzu.edu.cn/info/1040/13579.htm");
        assert_eq!(notices[0].date, "2024-09-02");
        assert_eq!(notices[1].title, "选课通知");
        assert_eq!(notices[1].date, "2024-08-30");

        let inner_page = Url::parse("https://jwch.fzu.edu.cn/jxtz/186.htm").unwrap();
        let notices = parse_notices(&Html::parse_document(BOARD), &inner_page).unwrap();
        assert_eq!(notices[0].url, "https://jwch.fzu.edu.cn/jxtz/info/1040/13579.htm");
    }

    #[test]
    fn total_pages() {
        assert_eq!(parse_total_pages(&Html::parse_document(BOARD)).unwrap(), 187);
        assert!(parse_total_pages(&Html::parse_document("<p></p>")).is_err());
    }
}
