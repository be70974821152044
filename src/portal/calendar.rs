use encoding_rs::GB18030;
use log::warn;
use scraper::Html;
use url::Url;

use crate::{
    api::JwchClient,
    constants::SCHOOL_CALENDAR_URL,
    parser::calendar::{parse_locate_date, parse_school_calendar, parse_term_events},
    schema::{CalTermEvents, LocateDate, SchoolCalendar},
};

/// The calendar pages are served in GB18030.
fn decode(bytes: &[u8]) -> Html {
    let (text, _, had_errors) = GB18030.decode(bytes);
    if had_errors {
        warn!("The calendar page contained malformed GB18030 sequences");
    }
    Html::parse_document(&text)
}

pub async fn fetch_school_calendar(client: &JwchClient) -> anyhow::Result<SchoolCalendar> {
    let bytes = client.get_bytes_with_identifier(SCHOOL_CALENDAR_URL).await?;
    parse_school_calendar(&decode(&bytes))
}

/// Events of a term given by its full id, such as `2024012024082620250117`.
pub async fn fetch_term_events(client: &JwchClient, term_id: &str) -> anyhow::Result<CalTermEvents> {
    let bytes = client
        .post_bytes_with_identifier(SCHOOL_CALENDAR_URL, &[("xq", term_id), ("submit", "提交")])
        .await?;
    Ok(parse_term_events(term_id, &decode(&bytes)))
}

/// The current teaching week. The date script needs no session.
pub async fn fetch_locate_date(
    client: &JwchClient,
    locate_date_url: &Url,
) -> anyhow::Result<LocateDate> {
    parse_locate_date(&client.get_public(locate_date_url).await?)
}
