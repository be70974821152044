use log::debug;
use scraper::Html;
use serde::Serialize;

use crate::{
    api::JwchClient,
    constants::{CLASSROOM_QUERY_URL, EXAM_ROOM_QUERY_URL, QISHAN_BUILDINGS},
    parser::{
        form_state,
        room::{parse_empty_rooms, parse_exam_rooms, parse_room_types},
    },
    schema::{EmptyRoomQuery, ExamRoomInfo, FormState},
};

use super::{gather_in_order, TermForm};

pub async fn fetch_exam_rooms(client: &JwchClient, term: &str) -> anyhow::Result<Vec<ExamRoomInfo>> {
    let state = form_state(&client.get_with_identifier(EXAM_ROOM_QUERY_URL).await?)?;
    let form = TermForm::new(&state, term);
    parse_exam_rooms(&client.post_with_identifier(EXAM_ROOM_QUERY_URL, &form).await?)
}

#[derive(Clone, Debug, Serialize)]
struct EmptyRoomForm {
    #[serde(flatten)]
    state: FormState,
    #[serde(rename = "ctl00$TB_rq")]
    date: String,
    #[serde(rename = "ctl00$qsjdpl")]
    start: String,
    #[serde(rename = "ctl00$zzjdpl")]
    end: String,
    #[serde(rename = "ctl00$jxldpl", skip_serializing_if = "Option::is_none")]
    building: Option<String>,
    #[serde(rename = "ctl00$jslxdpl", skip_serializing_if = "Option::is_none")]
    room_type: Option<String>,
    #[serde(rename = "ctl00$xqdpl")]
    campus: String,
    #[serde(rename = "ctl00$xz1")]
    seats_op: &'static str,
    #[serde(rename = "ctl00$jsrldpl")]
    seats: &'static str,
    #[serde(rename = "ctl00$xz2")]
    exam_seats_op: &'static str,
    #[serde(rename = "ctl00$ksrldpl")]
    exam_seats: &'static str,
    #[serde(rename = "ctl00$ContentPlaceHolder1$BT_search")]
    search: &'static str,
}
impl EmptyRoomForm {
    /// A search with no capacity constraint.
    fn new(state: FormState, query: &EmptyRoomQuery, building: Option<&str>) -> Self {
        Self {
            state,
            date: query.date.clone(),
            start: query.start.clone(),
            end: query.end.clone(),
            building: building.map(str::to_owned),
            room_type: None,
            campus: query.campus.clone(),
            seats_op: ">=",
            seats: "0",
            exam_seats_op: ">=",
            exam_seats: "0",
            search: "查询",
        }
    }

    fn with_room_type(&self, state: &FormState, room_type: &str) -> Self {
        Self {
            state: state.clone(),
            room_type: Some(room_type.to_owned()),
            ..self.clone()
        }
    }
}

/// Room types offered for `form`, with the postback state to search them with.
async fn room_types(
    client: &JwchClient,
    form: &EmptyRoomForm,
) -> anyhow::Result<(Vec<String>, FormState)> {
    let text = client
        .post_text_with_identifier(CLASSROOM_QUERY_URL, form)
        .await?;
    let html = Html::parse_document(text.trim());
    Ok((parse_room_types(&html), form_state(&html)?))
}

async fn empty_rooms(client: &JwchClient, form: &EmptyRoomForm) -> anyhow::Result<Vec<String>> {
    let text = client
        .post_text_with_identifier(CLASSROOM_QUERY_URL, form)
        .await?;
    Ok(parse_empty_rooms(&Html::parse_document(text.trim())))
}

async fn initial_state(client: &JwchClient) -> anyhow::Result<FormState> {
    form_state(&client.get_with_identifier(CLASSROOM_QUERY_URL).await?)
}

/// Empty rooms of a campus, searched with one request per room type in parallel.
pub async fn fetch_empty_rooms(
    client: &JwchClient,
    query: &EmptyRoomQuery,
) -> anyhow::Result<Vec<String>> {
    let form = EmptyRoomForm::new(initial_state(client).await?, query, None);
    let (types, state) = room_types(client, &form).await?;
    debug!("Searching {} room types", types.len());
    let jobs = types.iter().map(|room_type| {
        let client = client.clone();
        let form = form.with_room_type(&state, room_type);
        async move { empty_rooms(&client, &form).await }
    });
    Ok(gather_in_order(jobs).await?.concat())
}

/// Empty rooms of the Qishan campus, searched building by building in parallel.
///
/// Room types of one building are searched one after another.
pub async fn fetch_qishan_empty_rooms(
    client: &JwchClient,
    query: &EmptyRoomQuery,
) -> anyhow::Result<Vec<String>> {
    let state = initial_state(client).await?;
    let jobs = QISHAN_BUILDINGS.iter().map(|&building| {
        let client = client.clone();
        let form = EmptyRoomForm::new(state.clone(), query, Some(building));
        async move {
            let (types, state) = room_types(&client, &form).await?;
            let mut rooms = vec![];
            for room_type in &types {
                rooms.extend(empty_rooms(&client, &form.with_room_type(&state, room_type)).await?);
            }
            debug!("Found {} rooms in {building}", rooms.len());
            anyhow::Ok(rooms)
        }
    });
    Ok(gather_in_order(jobs).await?.concat())
}
