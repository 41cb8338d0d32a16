//! Insert command handlers.

use crate::args::{InsertExpenseArgs, InsertStudySessionArgs, InsertTodoArgs};
use crate::commands::{session, Out};
use crate::model::{Expense, NewExpense, NewStudySession, NewTodo, Record, StudySession, Todo};
use crate::store::Mode;
use crate::{Config, Result};
use chrono::{Local, NaiveDate};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Adds an expense. The date defaults to today.
pub async fn insert_expense(
    config: Config,
    mode: Mode,
    args: InsertExpenseArgs,
) -> Result<Out<Expense>> {
    let mut tracker = session(&config, mode).await?;
    let expense = tracker
        .add_expense(NewExpense {
            category: args.category,
            amount: args.amount,
            description: args.description,
            date: args.date.unwrap_or_else(today),
        })
        .await?;
    let message = format!(
        "Added expense {}: {} {} on {}",
        expense.id(),
        expense.category(),
        expense.amount(),
        expense.date()
    );
    Ok(Out::new(message, expense))
}

/// Adds a study session. The date defaults to today.
pub async fn insert_study_session(
    config: Config,
    mode: Mode,
    args: InsertStudySessionArgs,
) -> Result<Out<StudySession>> {
    let mut tracker = session(&config, mode).await?;
    let study_session = tracker
        .add_study_session(NewStudySession {
            subject: args.subject,
            hours: args.hours,
            date: args.date.unwrap_or_else(today),
        })
        .await?;
    let message = format!(
        "Added study session {}: {} for {}h on {}",
        study_session.id(),
        study_session.subject(),
        study_session.hours(),
        study_session.date()
    );
    Ok(Out::new(message, study_session))
}

/// Adds a pending todo.
pub async fn insert_todo(config: Config, mode: Mode, args: InsertTodoArgs) -> Result<Out<Todo>> {
    let mut tracker = session(&config, mode).await?;
    let todo = tracker
        .add_todo(NewTodo {
            task: args.task,
            priority: args.priority,
            due_time: args.due_time.filter(|s| !s.trim().is_empty()),
        })
        .await?;
    let message = format!("Added todo {}: {}", todo.id(), todo.task());
    Ok(Out::new(message, todo))
}
