use crate::model::{NumericText, Owner, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A block of time spent studying one subject on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StudySession {
    pub(crate) id: String,
    #[serde(rename = "user_id")]
    pub(crate) owner: Owner,
    pub(crate) subject: String,
    pub(crate) hours: NumericText,
    pub(crate) date: NaiveDate,
}

impl StudySession {
    pub(crate) fn from_new(id: impl Into<String>, owner: &Owner, new: NewStudySession) -> Self {
        Self {
            id: id.into(),
            owner: owner.clone(),
            subject: new.subject,
            hours: new.hours,
            date: new.date,
        }
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn hours(&self) -> &NumericText {
        &self.hours
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Record for StudySession {
    type Updates = StudySessionUpdates;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, updates: &StudySessionUpdates) {
        if let Some(subject) = &updates.subject {
            self.subject = subject.clone();
        }
        if let Some(hours) = &updates.hours {
            self.hours = hours.clone();
        }
        if let Some(date) = updates.date {
            self.date = date;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudySession {
    pub subject: String,
    pub hours: NumericText,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySessionUpdates {
    pub subject: Option<String>,
    pub hours: Option<NumericText>,
    pub date: Option<NaiveDate>,
}

impl StudySessionUpdates {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.hours.is_none() && self.date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_moves_date() {
        let mut session = StudySession::from_new(
            "s1",
            &Owner::new("u1"),
            NewStudySession {
                subject: "Physics".to_string(),
                hours: NumericText::new("2"),
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            },
        );
        let new_date = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        session.apply(&StudySessionUpdates {
            date: Some(new_date),
            ..Default::default()
        });
        assert_eq!(session.date(), new_date);
        assert_eq!(session.subject(), "Physics");
        assert_eq!(session.hours().value(), 2.0);
        assert_eq!(session.id(), "s1");
    }
}
