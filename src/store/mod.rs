//! The persistence collaborator: where records live between runs.
//!
//! The `Store` trait is the seam between the tracker and whatever holds the data. `SqliteStore`
//! keeps records in a local SQLite file. `MemoryStore` holds them in memory and backs demo mode
//! and the tests.

mod memory;
mod migrations;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::model::{
    Expense, ExpenseUpdates, NewExpense, NewStudySession, NewTodo, Owner, StudySession,
    StudySessionUpdates, Table, Todo, TodoUpdates,
};
use crate::{Config, Result};
use anyhow::Context;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, warn};

/// The environment variable that switches the CLI over to an in-memory store full of demo data.
const DEMO_MODE_ENV: &str = "TRACKER_DEMO_MODE";

/// Record storage scoped by owner. Every call is a single round trip that either fully succeeds
/// or fails without side effects.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// All of the owner's expenses, most recently created first.
    async fn expenses(&self, owner: &Owner) -> Result<Vec<Expense>>;

    /// All of the owner's study sessions, most recently created first.
    async fn study_sessions(&self, owner: &Owner) -> Result<Vec<StudySession>>;

    /// All of the owner's todos, most recently created first.
    async fn todos(&self, owner: &Owner) -> Result<Vec<Todo>>;

    /// Saves a new expense and returns it with its generated id.
    async fn insert_expense(&self, owner: &Owner, new: NewExpense) -> Result<Expense>;

    async fn insert_study_session(
        &self,
        owner: &Owner,
        new: NewStudySession,
    ) -> Result<StudySession>;

    async fn insert_todo(&self, owner: &Owner, new: NewTodo) -> Result<Todo>;

    /// Applies `updates` to the owner's expense with `id` and returns the result, or `None` when
    /// the owner has no such expense.
    async fn update_expense(
        &self,
        owner: &Owner,
        id: &str,
        updates: &ExpenseUpdates,
    ) -> Result<Option<Expense>>;

    async fn update_study_session(
        &self,
        owner: &Owner,
        id: &str,
        updates: &StudySessionUpdates,
    ) -> Result<Option<StudySession>>;

    async fn update_todo(
        &self,
        owner: &Owner,
        id: &str,
        updates: &TodoUpdates,
    ) -> Result<Option<Todo>>;

    /// Removes the owner's record with `id` from `table`. Returns `false` when there was nothing
    /// to remove.
    async fn delete(&self, owner: &Owner, table: Table, id: &str) -> Result<bool>;
}

/// Selects which `Store` implementation the CLI uses.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Mode {
    /// Records are kept in the SQLite file named by the config.
    #[default]
    Sqlite,
    /// Records are seeded with demo data, held in memory and discarded at exit.
    Demo,
}

impl Mode {
    /// `Mode::Demo` when `TRACKER_DEMO_MODE` is set to something non-empty, otherwise
    /// `Mode::Sqlite`.
    pub fn from_env() -> Self {
        match std::env::var(DEMO_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Demo,
            _ => Mode::Sqlite,
        }
    }
}

/// Opens the store that `mode` asks for.
pub async fn open(config: &Config, mode: Mode) -> Result<Box<dyn Store>> {
    Ok(match mode {
        Mode::Sqlite => Box::new(
            SqliteStore::load(config.sqlite_path())
                .await
                .context("Unable to load SQLite DB")?,
        ),
        Mode::Demo => {
            debug!("Using the in-memory demo store");
            Box::new(MemoryStore::demo(config.owner()))
        }
    })
}

/// The three record collections for one owner, as held in memory by a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Collections {
    pub expenses: Vec<Expense>,
    pub study_sessions: Vec<StudySession>,
    pub todos: Vec<Todo>,
}

impl Collections {
    /// Fetches all three collections at once and waits for every fetch to finish. A fetch that
    /// fails leaves its collection empty; the others are kept.
    pub async fn fetch(store: &dyn Store, owner: &Owner) -> Self {
        let (expenses, study_sessions, todos) = tokio::join!(
            store.expenses(owner),
            store.study_sessions(owner),
            store.todos(owner),
        );
        Self {
            expenses: or_empty(Table::Expenses, expenses),
            study_sessions: or_empty(Table::StudySessions, study_sessions),
            todos: or_empty(Table::Todos, todos),
        }
    }
}

fn or_empty<T: Debug>(table: Table, result: Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(records) => {
            debug!("Fetched {} rows from {table}", records.len());
            records
        }
        Err(e) => {
            warn!("Unable to fetch {table}, showing none: {e:#}");
            Vec::new()
        }
    }
}
