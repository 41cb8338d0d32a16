use crate::model::Todo;
use serde::Serialize;

/// How much of the todo list is done.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TodoCompletion {
    pub completed: usize,
    pub total: usize,
    /// `completed / total`, or `0.0` for an empty list.
    pub ratio: f64,
}

impl TodoCompletion {
    pub fn new(todos: &[Todo]) -> Self {
        let completed = todos.iter().filter(|t| t.is_completed()).count();
        let total = todos.len();
        let ratio = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64
        };
        Self {
            completed,
            total,
            ratio,
        }
    }

    /// The ratio as a percentage for a progress bar, clamped to `[0, 100]`.
    pub fn progress_percent(&self) -> f64 {
        (self.ratio * 100.0).clamp(0.0, 100.0)
    }

    /// The percentage rounded to a whole number for display.
    pub fn display_percent(&self) -> u32 {
        self.progress_percent().round() as u32
    }
}
