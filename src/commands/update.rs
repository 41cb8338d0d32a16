//! Update command handlers, including the todo checkbox toggle.

use crate::args::{ToggleArgs, UpdateExpenseArgs, UpdateStudySessionArgs, UpdateTodoArgs};
use crate::commands::{session, Out};
use crate::model::{
    Expense, ExpenseUpdates, Record, StudySession, StudySessionUpdates, Todo, TodoUpdates,
};
use crate::store::Mode;
use crate::{Config, Result};
use anyhow::ensure;
use serde::Serialize;
use std::fmt::Debug;

const NOTHING_TO_UPDATE: &str = "Nothing to update, pass at least one field to change";

pub async fn update_expense(
    config: Config,
    mode: Mode,
    args: UpdateExpenseArgs,
) -> Result<Out<Expense>> {
    let updates = ExpenseUpdates {
        category: args.category,
        amount: args.amount,
        description: args.description,
        date: args.date,
    };
    ensure!(!updates.is_empty(), NOTHING_TO_UPDATE);
    let mut tracker = session(&config, mode).await?;
    Ok(match tracker.update_expense(&args.id, &updates).await? {
        Some(expense) => Out::new(format!("Updated expense {}", expense.id()), expense),
        None => not_found("expense", &args.id),
    })
}

pub async fn update_study_session(
    config: Config,
    mode: Mode,
    args: UpdateStudySessionArgs,
) -> Result<Out<StudySession>> {
    let updates = StudySessionUpdates {
        subject: args.subject,
        hours: args.hours,
        date: args.date,
    };
    ensure!(!updates.is_empty(), NOTHING_TO_UPDATE);
    let mut tracker = session(&config, mode).await?;
    Ok(match tracker.update_study_session(&args.id, &updates).await? {
        Some(study_session) => Out::new(
            format!("Updated study session {}", study_session.id()),
            study_session,
        ),
        None => not_found("study session", &args.id),
    })
}

pub async fn update_todo(config: Config, mode: Mode, args: UpdateTodoArgs) -> Result<Out<Todo>> {
    let updates = TodoUpdates {
        task: args.task,
        priority: args.priority,
        status: args.status,
        due_time: args.due_time,
    };
    ensure!(!updates.is_empty(), NOTHING_TO_UPDATE);
    let mut tracker = session(&config, mode).await?;
    Ok(match tracker.update_todo(&args.id, &updates).await? {
        Some(todo) => Out::new(format!("Updated todo {}", todo.id()), todo),
        None => not_found("todo", &args.id),
    })
}

/// Flips a todo between pending and completed.
pub async fn toggle(config: Config, mode: Mode, args: ToggleArgs) -> Result<Out<Todo>> {
    let mut tracker = session(&config, mode).await?;
    Ok(match tracker.toggle_todo(args.id()).await? {
        Some(todo) => {
            let message = format!("Marked '{}' as {}", todo.task(), todo.status());
            Out::new(message, todo)
        }
        None => not_found("todo", args.id()),
    })
}

fn not_found<T>(noun: &str, id: &str) -> Out<T>
where
    T: Serialize + Clone + Debug,
{
    Out::new_message(format!("No {noun} with id {id}, nothing changed"))
}
