use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// One recurring (or single-week) class meeting.
///
/// Weeks and classes are inclusive ranges, `weekday` runs from 1 (Monday) to 7 (Sunday).
/// `single` and `double` tell whether the rule applies on odd and even weeks respectively.
#[derive(
    Clone, PartialEq, Eq, Hash, Debug, TypedBuilder, Getters, CopyGetters, Serialize, Deserialize,
)]
pub struct ScheduleRule {
    #[getset(get = "pub")]
    #[builder(default, setter(into))]
    location: String,
    #[getset(get_copy = "pub")]
    start_class: u32,
    #[getset(get_copy = "pub")]
    end_class: u32,
    #[getset(get_copy = "pub")]
    start_week: u32,
    #[getset(get_copy = "pub")]
    end_week: u32,
    #[getset(get_copy = "pub")]
    weekday: u32,
    #[getset(get_copy = "pub")]
    #[builder(default = true)]
    single: bool,
    #[getset(get_copy = "pub")]
    #[builder(default = true)]
    double: bool,
    #[getset(get_copy = "pub")]
    #[builder(default)]
    adjusted: bool,
    #[getset(get_copy = "pub")]
    #[builder(default)]
    from_full_week: bool,
}

impl ScheduleRule {
    /// A rule that applies on neither odd nor even weeks never takes place.
    pub fn takes_place(&self) -> bool {
        self.single || self.double
    }

    pub fn contains_week(&self, week: u32) -> bool {
        (self.start_week..=self.end_week).contains(&week)
    }

    /// The same meeting restricted to `start_week..=end_week`.
    pub(crate) fn with_weeks(&self, start_week: u32, end_week: u32) -> Self {
        Self {
            start_week,
            end_week,
            adjusted: false,
            ..self.clone()
        }
    }

    /// Key used to order rules: weekday, start week and start class come first,
    /// and the remaining fields make the order total.
    #[allow(clippy::type_complexity)]
    pub(crate) fn sort_key(&self) -> (u32, u32, u32, u32, u32, &str, bool, bool, bool, bool) {
        (
            self.weekday,
            self.start_week,
            self.start_class,
            self.end_class,
            self.end_week,
            &*self.location,
            self.single,
            self.double,
            self.adjusted,
            self.from_full_week,
        )
    }
}

/// A single-week reschedule: `old_week` of the matching meeting moves to `new_week`.
#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Getters, CopyGetters, Serialize, Deserialize)]
pub struct AdjustmentRule {
    #[getset(get_copy = "pub")]
    old_week: u32,
    #[getset(get_copy = "pub")]
    old_weekday: u32,
    #[getset(get_copy = "pub")]
    old_start_class: u32,
    #[getset(get_copy = "pub")]
    old_end_class: u32,
    #[getset(get_copy = "pub")]
    new_week: u32,
    #[getset(get_copy = "pub")]
    new_weekday: u32,
    #[getset(get_copy = "pub")]
    new_start_class: u32,
    #[getset(get_copy = "pub")]
    new_end_class: u32,
    #[getset(get = "pub")]
    #[builder(default, setter(into))]
    new_location: String,
}

impl AdjustmentRule {
    /// Whether this adjustment moves one of the weeks of `base`.
    pub fn applies_to(&self, base: &ScheduleRule) -> bool {
        self.old_weekday == base.weekday
            && self.old_start_class == base.start_class
            && self.old_end_class == base.end_class
            && base.contains_week(self.old_week)
    }

    /// The meeting this adjustment creates.
    pub fn destination(&self) -> ScheduleRule {
        ScheduleRule::builder()
            .location(self.new_location.clone())
            .start_class(self.new_start_class)
            .end_class(self.new_end_class)
            .start_week(self.new_week)
            .end_week(self.new_week)
            .weekday(self.new_weekday)
            .adjusted(true)
            .build()
    }
}
