//! A user session: the owner's records held in memory, kept in step with the store.
//!
//! Every mutation makes at most one store call. Only when the store confirms it is the in-memory
//! collection patched, so a failed call leaves the session exactly as it was.

use crate::aggregate::DashboardSummary;
use crate::model::{
    Expense, ExpenseUpdates, NewExpense, NewStudySession, NewTodo, Owner, Record, StudySession,
    StudySessionUpdates, Table, Todo, TodoUpdates,
};
use crate::store::{Collections, Store};
use crate::{reconcile, Result};
use anyhow::Context;
use tracing::debug;

pub struct Tracker {
    store: Box<dyn Store>,
    owner: Owner,
    data: Collections,
}

impl Tracker {
    /// Starts a session by fetching all of the owner's records. A collection whose fetch fails
    /// starts out empty.
    pub async fn load(store: Box<dyn Store>, owner: Owner) -> Self {
        let data = Collections::fetch(store.as_ref(), &owner).await;
        debug!(
            "Loaded {} expenses, {} study sessions and {} todos for {owner}",
            data.expenses.len(),
            data.study_sessions.len(),
            data.todos.len()
        );
        Self { store, owner, data }
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn data(&self) -> &Collections {
        &self.data
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.data.expenses
    }

    pub fn study_sessions(&self) -> &[StudySession] {
        &self.data.study_sessions
    }

    pub fn todos(&self) -> &[Todo] {
        &self.data.todos
    }

    /// Recomputes the dashboard numbers from the records currently held.
    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::new(
            &self.data.expenses,
            &self.data.study_sessions,
            &self.data.todos,
        )
    }

    pub async fn add_expense(&mut self, new: NewExpense) -> Result<Expense> {
        let expense = self
            .store
            .insert_expense(&self.owner, new)
            .await
            .context("Failed to add expense")?;
        self.data.expenses = reconcile::insert(&self.data.expenses, expense.clone());
        Ok(expense)
    }

    pub async fn add_study_session(&mut self, new: NewStudySession) -> Result<StudySession> {
        let session = self
            .store
            .insert_study_session(&self.owner, new)
            .await
            .context("Failed to add study session")?;
        self.data.study_sessions = reconcile::insert(&self.data.study_sessions, session.clone());
        Ok(session)
    }

    pub async fn add_todo(&mut self, new: NewTodo) -> Result<Todo> {
        let todo = self
            .store
            .insert_todo(&self.owner, new)
            .await
            .context("Failed to add todo")?;
        self.data.todos = reconcile::insert(&self.data.todos, todo.clone());
        Ok(todo)
    }

    /// Edits one of the owner's expenses. Returns `None`, with nothing changed, when the owner has
    /// no expense with `id`.
    pub async fn update_expense(
        &mut self,
        id: &str,
        updates: &ExpenseUpdates,
    ) -> Result<Option<Expense>> {
        let expense = self
            .store
            .update_expense(&self.owner, id, updates)
            .await
            .context("Failed to update expense")?;
        if expense.is_some() {
            self.data.expenses = reconcile::update(&self.data.expenses, id, updates);
        }
        Ok(expense)
    }

    pub async fn update_study_session(
        &mut self,
        id: &str,
        updates: &StudySessionUpdates,
    ) -> Result<Option<StudySession>> {
        let session = self
            .store
            .update_study_session(&self.owner, id, updates)
            .await
            .context("Failed to update study session")?;
        if session.is_some() {
            self.data.study_sessions = reconcile::update(&self.data.study_sessions, id, updates);
        }
        Ok(session)
    }

    pub async fn update_todo(&mut self, id: &str, updates: &TodoUpdates) -> Result<Option<Todo>> {
        let todo = self
            .store
            .update_todo(&self.owner, id, updates)
            .await
            .context("Failed to update todo")?;
        if todo.is_some() {
            self.data.todos = reconcile::update(&self.data.todos, id, updates);
        }
        Ok(todo)
    }

    /// Flips a todo between pending and completed. An unknown id changes nothing.
    pub async fn toggle_todo(&mut self, id: &str) -> Result<Option<Todo>> {
        let Some(status) = self
            .data
            .todos
            .iter()
            .find(|t| t.id() == id)
            .map(|t| t.status())
        else {
            debug!("No todo with id '{id}' to toggle");
            return Ok(None);
        };
        self.update_todo(id, &TodoUpdates::with_status(status.toggled()))
            .await
    }

    /// Deletes one of the owner's records and reports whether there was one to delete.
    pub async fn delete(&mut self, table: Table, id: &str) -> Result<bool> {
        let deleted = self
            .store
            .delete(&self.owner, table, id)
            .await
            .with_context(|| format!("Failed to delete {}", noun(table)))?;
        match table {
            Table::Expenses => self.data.expenses = reconcile::delete(&self.data.expenses, id),
            Table::StudySessions => {
                self.data.study_sessions = reconcile::delete(&self.data.study_sessions, id)
            }
            Table::Todos => self.data.todos = reconcile::delete(&self.data.todos, id),
        }
        Ok(deleted)
    }
}

/// The singular name of a record in `table`, for messages.
pub(crate) fn noun(table: Table) -> &'static str {
    match table {
        Table::Expenses => "expense",
        Table::StudySessions => "study session",
        Table::Todos => "todo",
    }
}
