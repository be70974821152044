use jwch_utils::selector;
use scraper::{Html, Selector};

use crate::schema::StudentDetail;

use super::trimmed_text;

/// The student number shown on the information page, if the session is alive.
pub fn parse_student_number(html: &Html) -> Option<String> {
    html.select(selector!("#ContentPlaceHolder1_LB_xh"))
        .next()
        .map(trimmed_text)
        .filter(|number| !number.is_empty())
}

pub fn parse_student_detail(html: &Html) -> StudentDetail {
    let label = |selector: &Selector| {
        html.select(selector)
            .next()
            .map(trimmed_text)
            .unwrap_or_default()
    };
    StudentDetail {
        birthday: label(selector!("#ContentPlaceHolder1_LB_csrq")),
        sex: label(selector!("#ContentPlaceHolder1_LB_xb")),
        phone: label(selector!("#ContentPlaceHolder1_LB_lxdh")),
        email: label(selector!("#ContentPlaceHolder1_LB_email")),
        college: label(selector!("#ContentPlaceHolder1_LB_xymc")),
        grade: label(selector!("#ContentPlaceHolder1_LB_nj")),
        status_changes: label(selector!("#ContentPlaceHolder1_LB_xjxx")),
        major: label(selector!("#ContentPlaceHolder1_LB_zymc")),
        counselor: label(selector!("#ContentPlaceHolder1_LB_zdy")),
        examinee_category: label(selector!("#ContentPlaceHolder1_LB_kslb")),
        nationality: label(selector!("#ContentPlaceHolder1_LB_mz")),
        country: label(selector!("#ContentPlaceHolder1_LB_gb")),
        political_status: label(selector!("#ContentPlaceHolder1_LB_zzmm")),
        source: label(selector!("#ContentPlaceHolder1_LB_xssy")),
    }
}
