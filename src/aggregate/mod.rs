//! The aggregation engine: pure functions that turn a user's records into the numbers behind the
//! dashboard widgets.
//!
//! Nothing here is cached or accumulated between calls. Every function is a fold over the slice it
//! is given, so calling it twice with the same records gives the same answer. Numeric text that
//! does not parse is carried through as `NaN` instead of causing an error.

mod expenses;
mod study;
mod todos;

pub use expenses::{expense_breakdown, total_expenses, CategoryTotal};
pub use study::{total_study_hours, weekly_study_hours, WeekdayTotal, WEEK};
pub use todos::TodoCompletion;

use crate::model::{Expense, StudySession, Todo};
use serde::Serialize;

/// Everything the dashboard shows, derived from one user's records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub expense_breakdown: Vec<CategoryTotal>,
    pub total_expenses: f64,
    pub weekly_study: [WeekdayTotal; 7],
    pub total_study_hours: f64,
    pub todos: TodoCompletion,
}

impl DashboardSummary {
    pub fn new(expenses: &[Expense], sessions: &[StudySession], todos: &[Todo]) -> Self {
        let expense_breakdown = expense_breakdown(expenses);
        let total_expenses = total_expenses(&expense_breakdown);
        Self {
            expense_breakdown,
            total_expenses,
            weekly_study: weekly_study_hours(sessions),
            total_study_hours: total_study_hours(sessions),
            todos: TodoCompletion::new(todos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::test::{expense, session, todo};

    #[test]
    fn test_summary_of_nothing() {
        let summary = DashboardSummary::new(&[], &[], &[]);
        assert!(summary.expense_breakdown.is_empty());
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.weekly_study.len(), 7);
        assert_eq!(summary.total_study_hours, 0.0);
        assert_eq!(summary.todos.total, 0);
    }

    #[test]
    fn test_summary() {
        let expenses = vec![
            expense("1", "Food", "150", "2025-06-02"),
            expense("2", "Food", "50", "2025-06-02"),
            expense("3", "Transport", "500", "2025-06-03"),
        ];
        let sessions = vec![
            session("1", "Physics", "2", "2025-06-01"),
            session("2", "History", "1.5", "2025-06-02"),
        ];
        let todos = vec![
            todo("1", Status::Pending),
            todo("2", Status::Completed),
            todo("3", Status::Pending),
        ];
        let summary = DashboardSummary::new(&expenses, &sessions, &todos);
        assert_eq!(summary.expense_breakdown.len(), 2);
        assert_eq!(summary.total_expenses, 700.0);
        assert_eq!(summary.weekly_study[0].hours, 1.5);
        assert_eq!(summary.weekly_study[6].hours, 2.0);
        assert_eq!(summary.total_study_hours, 3.5);
        assert_eq!(summary.todos.display_percent(), 33);
    }

    #[test]
    fn test_poisoned_summary_still_serializes() {
        let expenses = vec![expense("1", "Food", "abc", "2025-06-02")];
        let summary = DashboardSummary::new(&expenses, &[], &[]);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["total_expenses"].is_null());
        assert!(json["expense_breakdown"][0]["value"].is_null());
    }
}
