use anyhow::{bail, Context};
use log::debug;
use scraper::Html;
use url::Url;

use crate::{
    api::JwchClient,
    constants::NOTICE_LIST_URL,
    parser::notice::{parse_notices, parse_total_pages},
    schema::NoticePage,
};

/// The board numbers its archive pages backwards: page `n` of `total` is `jxtz/{total - n + 1}.htm`,
/// and the first page is the board itself.
pub fn notice_page_url(page: u32, total_pages: u32) -> anyhow::Result<Url> {
    if page == 0 || page > total_pages {
        bail!("Page {page} is out of range 1..={total_pages}");
    }
    let url = Url::parse(NOTICE_LIST_URL)?;
    if page == 1 {
        return Ok(url);
    }
    Ok(url.join(&format!("jxtz/{}.htm", total_pages - page + 1))?)
}

/// Fetches the `page`-th page of the teaching notice board, counting from the newest.
pub async fn fetch_notices(client: &JwchClient, page: u32) -> anyhow::Result<NoticePage> {
    let first_url = Url::parse(NOTICE_LIST_URL)?;
    let first = client.get_public(&first_url).await?;
    let total_pages = parse_total_pages(&Html::parse_document(&first))?;
    let url = notice_page_url(page, total_pages)?;
    let body = if page == 1 {
        first
    } else {
        debug!("Fetching {url}");
        client.get_public(&url).await?
    };
    let notices = parse_notices(&Html::parse_document(&body), &url)
        .with_context(|| format!("While parsing {url}"))?;
    Ok(NoticePage {
        notices,
        total_pages,
    })
}
