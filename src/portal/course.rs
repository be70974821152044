use log::debug;

use crate::{
    api::JwchClient,
    constants::COURSE_URL,
    parser::course::{parse_courses, parse_terms},
    schema::{Course, TermList},
};

use super::TermForm;

pub async fn fetch_terms(client: &JwchClient) -> anyhow::Result<TermList> {
    parse_terms(&client.get_with_identifier(COURSE_URL).await?)
}

/// Courses selected in `term`, which must be one of `terms`' entries.
pub async fn fetch_semester_courses(
    client: &JwchClient,
    terms: &TermList,
    term: &str,
) -> anyhow::Result<Vec<Course>> {
    let form = TermForm::new(terms.state(), term);
    let courses = parse_courses(&client.post_with_identifier(COURSE_URL, &form).await?)?;
    debug!("Found {} courses in {term}", courses.len());
    Ok(courses)
}
