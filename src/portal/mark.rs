use crate::{
    api::JwchClient,
    constants::{CET_QUERY_URL, CREDIT_QUERY_URL, GPA_QUERY_URL, JS_QUERY_URL, MARKS_QUERY_URL},
    parser::{
        credit::parse_credit_statistics,
        gpa::parse_gpa,
        mark::{parse_marks, parse_unified_exams},
    },
    schema::{CreditStatistic, Gpa, Mark, UnifiedExam},
};

/// Marks of every term; the page does not filter by term.
pub async fn fetch_marks(client: &JwchClient) -> anyhow::Result<Vec<Mark>> {
    parse_marks(&client.get_with_identifier(MARKS_QUERY_URL).await?)
}

pub async fn fetch_cet(client: &JwchClient) -> anyhow::Result<Vec<UnifiedExam>> {
    parse_unified_exams(&client.get_with_identifier(CET_QUERY_URL).await?)
}

/// Results of the provincial computer proficiency exam.
pub async fn fetch_js(client: &JwchClient) -> anyhow::Result<Vec<UnifiedExam>> {
    parse_unified_exams(&client.get_with_identifier(JS_QUERY_URL).await?)
}

pub async fn fetch_gpa(client: &JwchClient) -> anyhow::Result<Gpa> {
    parse_gpa(&client.get_with_identifier(GPA_QUERY_URL).await?)
}

pub async fn fetch_credit(client: &JwchClient) -> anyhow::Result<Vec<CreditStatistic>> {
    parse_credit_statistics(&client.get_with_identifier(CREDIT_QUERY_URL).await?)
}
