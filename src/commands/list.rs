//! The `list` command: one table of records as text lines.

use crate::args::ListArgs;
use crate::commands::{plural, session, Out};
use crate::model::{Expense, Record, StudySession, Table, Todo};
use crate::store::Mode;
use crate::tracker::noun;
use crate::{utils, Config, Result};
use serde::Serialize;
use std::fmt::Write;

/// The records a `list` call returned.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Listing {
    Expenses(Vec<Expense>),
    StudySessions(Vec<StudySession>),
    Todos(Vec<Todo>),
}

impl Listing {
    pub fn len(&self) -> usize {
        match self {
            Listing::Expenses(v) => v.len(),
            Listing::StudySessions(v) => v.len(),
            Listing::Todos(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lines(&self) -> Vec<String> {
        match self {
            Listing::Expenses(v) => v.iter().map(expense_line).collect(),
            Listing::StudySessions(v) => v.iter().map(study_session_line).collect(),
            Listing::Todos(v) => v.iter().map(todo_line).collect(),
        }
    }
}

/// Lists the owner's records in one table, most recent first.
pub async fn list(config: Config, mode: Mode, args: ListArgs) -> Result<Out<Listing>> {
    let tracker = session(&config, mode).await?;
    let limit = args.limit().unwrap_or(usize::MAX);
    let listing = match args.table() {
        Table::Expenses => Listing::Expenses(first(tracker.expenses(), limit)),
        Table::StudySessions => Listing::StudySessions(first(tracker.study_sessions(), limit)),
        Table::Todos => Listing::Todos(first(tracker.todos(), limit)),
    };

    let mut message = plural(listing.len(), noun(args.table()));
    for line in listing.lines() {
        let _ = write!(message, "\n  {line}");
    }
    Ok(Out::new(message, listing))
}

fn first<R: Clone>(records: &[R], limit: usize) -> Vec<R> {
    records.iter().take(limit).cloned().collect()
}

pub(super) fn expense_line(e: &Expense) -> String {
    let mut line = format!(
        "{}  {}  {}  {}",
        e.date(),
        e.category(),
        utils::fmt_money(e.amount().value()),
        e.id()
    );
    if let Some(description) = e.description() {
        let _ = write!(line, "  ({description})");
    }
    line
}

pub(super) fn study_session_line(s: &StudySession) -> String {
    format!(
        "{}  {}  {}h  {}",
        s.date(),
        s.subject(),
        utils::fmt_hours(s.hours().value()),
        s.id()
    )
}

pub(super) fn todo_line(t: &Todo) -> String {
    let check = if t.is_completed() { "[x]" } else { "[ ]" };
    let mut line = format!("{check} {} ({})", t.task(), t.priority());
    if let Some(due) = t.due_time() {
        let _ = write!(line, "  due {due}");
    }
    let _ = write!(line, "  {}", t.id());
    line
}
