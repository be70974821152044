use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::schedule::ScheduleRule;

/// ASP.NET postback state that every form submission must echo back.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FormState {
    #[serde(rename = "__VIEWSTATE")]
    pub view_state: String,
    #[serde(rename = "__EVENTVALIDATION")]
    pub event_validation: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct TermList {
    pub(crate) terms: Vec<String>,
    pub(crate) state: FormState,
}

#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct Course {
    #[builder(setter(into))]
    kind: String,
    #[builder(setter(into))]
    name: String,
    #[builder(default)]
    syllabus_url: Option<String>,
    #[builder(default)]
    lesson_plan_url: Option<String>,
    #[builder(setter(into))]
    credits: String,
    #[builder(setter(into))]
    elective_type: String,
    #[builder(setter(into))]
    exam_type: String,
    #[builder(setter(into))]
    teacher: String,
    schedule_rules: Vec<ScheduleRule>,
    #[builder(setter(into))]
    raw_schedule_rules: String,
    #[builder(setter(into))]
    raw_exam_time: String,
    #[builder(setter(into))]
    raw_adjust: String,
    #[builder(default, setter(into))]
    remark: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Mark {
    pub kind: String,
    pub semester: String,
    pub name: String,
    pub credits: String,
    pub score: String,
    pub gpa: String,
    pub earned_credits: String,
    pub elective_type: String,
    pub exam_type: String,
    pub teacher: String,
    pub classroom: String,
    pub exam_time: String,
}

/// A CET or computer-proficiency result.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UnifiedExam {
    pub name: String,
    pub term: String,
    pub score: String,
}

#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StudentDetail {
    pub birthday: String,
    pub sex: String,
    pub phone: String,
    pub email: String,
    pub college: String,
    pub grade: String,
    pub status_changes: String,
    pub major: String,
    pub counselor: String,
    pub examinee_category: String,
    pub nationality: String,
    pub country: String,
    pub political_status: String,
    pub source: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ExamRoomInfo {
    pub course_name: String,
    pub credit: String,
    pub teacher: String,
    pub date: String,
    pub time: String,
    pub location: String,
}

#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Serialize, Deserialize, clap::Args)]
pub struct EmptyRoomQuery {
    /// Campus name, e.g. 旗山校区
    #[arg(long)]
    #[builder(setter(into))]
    pub campus: String,
    /// Date in `YYYY-MM-DD`
    #[arg(long)]
    #[builder(setter(into))]
    pub date: String,
    /// First class of the span
    #[arg(long)]
    #[builder(setter(into))]
    pub start: String,
    /// Last class of the span
    #[arg(long)]
    #[builder(setter(into))]
    pub end: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SchoolCalendar {
    pub current_term: String,
    pub terms: Vec<CalTerm>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CalTerm {
    pub term_id: String,
    pub school_year: String,
    pub term: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CalTermEvents {
    pub term_id: String,
    pub term: String,
    pub school_year: String,
    pub events: Vec<CalTermEvent>,
}

/// A named span of the calendar. Dates are empty for entries without a range.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CalTermEvent {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub url: String,
    pub date: String,
}

#[derive(Clone, PartialEq, Eq, Debug, CopyGetters, Getters, Serialize, Deserialize)]
pub struct NoticePage {
    #[getset(get = "pub")]
    pub(crate) notices: Vec<Notice>,
    #[getset(get_copy = "pub")]
    pub(crate) total_pages: u32,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Gpa {
    /// When the portal last computed the ranking.
    pub time: String,
    pub data: Vec<GpaEntry>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GpaEntry {
    pub kind: String,
    pub value: String,
}

/// Credits of one category in the credit statistics.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CreditStatistic {
    pub kind: String,
    pub gain: String,
    pub total: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Lecture {
    pub category: String,
    pub issue_number: u32,
    pub title: String,
    pub speaker: String,
    /// `YYYY-MM-DD HH:MM` when the portal's format is recognized, verbatim otherwise.
    pub time: String,
    pub location: String,
    pub attendance_status: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LocateDate {
    pub week: String,
    pub year: String,
    pub term: String,
}
