use crate::model::StudySession;
use chrono::{Datelike, Weekday};
use serde::Serialize;

/// Column order of the weekly chart.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// One bar of the weekly study chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekdayTotal {
    /// Serializes as the short label, e.g. `"Mon"`.
    pub day: Weekday,
    pub hours: f64,
}

/// Buckets study hours by weekday, Monday first.
///
/// Every session counts toward its weekday no matter which week it falls in, so this reflects
/// the typical load per weekday over all recorded time. Hours that do not parse make their
/// bucket `NaN`.
pub fn weekly_study_hours(sessions: &[StudySession]) -> [WeekdayTotal; 7] {
    let mut week = WEEK.map(|day| WeekdayTotal { day, hours: 0.0 });
    for session in sessions {
        week[bucket(session.date().weekday())].hours += session.hours().value();
    }
    week
}

/// Sum of every session's hours.
pub fn total_study_hours(sessions: &[StudySession]) -> f64 {
    sessions.iter().map(|s| s.hours().value()).sum()
}

/// Maps a Sunday-first weekday index (Sun=0..Sat=6) onto a Monday-first one (Mon=0..Sun=6).
fn bucket(weekday: Weekday) -> usize {
    (weekday.num_days_from_sunday() as usize + 6) % 7
}
