use url::Url;

use crate::{
    api::JwchClient,
    constants::USER_INFO_URL,
    parser::{lecture::parse_lectures, user::parse_student_detail},
    schema::{Lecture, StudentDetail},
};

pub async fn fetch_student_detail(client: &JwchClient) -> anyhow::Result<StudentDetail> {
    Ok(parse_student_detail(
        &client.get_with_identifier(USER_INFO_URL).await?,
    ))
}

/// Lectures the student signed up for, listed on the page at `lecture_url`.
pub async fn fetch_lectures(
    client: &JwchClient,
    lecture_url: &Url,
) -> anyhow::Result<Vec<Lecture>> {
    parse_lectures(&client.get_with_identifier(lecture_url.as_str()).await?)
}
