//! Implements the `Store` trait on top of a local SQLite file.

use crate::model::{
    Expense, ExpenseUpdates, NewExpense, NewStudySession, NewTodo, NumericText, Owner, Priority,
    Record, Status, StudySession, StudySessionUpdates, Table, Todo, TodoUpdates,
};
use crate::store::{migrations, Store};
use crate::{utils, Result};
use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, trace};

type ExpenseRow = (String, String, String, String, Option<String>, String);
type StudySessionRow = (String, String, String, String, String);
type TodoRow = (String, String, String, String, String, Option<String>);

const SELECT_EXPENSES: &str =
    "SELECT id, owner, category, amount, description, date FROM expenses";
const SELECT_STUDY_SESSIONS: &str = "SELECT id, owner, subject, hours, date FROM study_sessions";
const SELECT_TODOS: &str = "SELECT id, owner, task, priority, status, due_time FROM todos";
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, rowid DESC";

/// Record storage in a SQLite file. One connection is enough for a single CLI process.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// - Validates that no file currently exists at `path`
    /// - Creates a new SQLite file at `path`
    /// - Initializes the schema
    pub async fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            bail!("A database already exists at {}", path.display());
        }
        debug!("Creating SQLite database at {}", path.display());
        Self::open(path).await
    }

    /// - Validates that there is a SQLite file at `path`
    /// - Brings the schema up to date with migrations
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("No database found at {}", path.display());
        }
        Self::open(path).await
    }

    async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Unable to open database at {}", path.display()))?;
        migrations::migrate(&pool)
            .await
            .context("Unable to migrate the database schema")?;
        Ok(Self { pool })
    }

    async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .context("Failed to begin transaction")
    }

    async fn find_expense(
        tx: &mut Transaction<'static, Sqlite>,
        owner: &Owner,
        id: &str,
    ) -> Result<Option<Expense>> {
        let row: Option<ExpenseRow> =
            sqlx::query_as(&format!("{SELECT_EXPENSES} WHERE owner = ? AND id = ?"))
                .bind(owner.as_str())
                .bind(id)
                .fetch_optional(&mut **tx)
                .await
                .context("Failed to query expenses")?;
        row.map(expense_from_row).transpose()
    }

    async fn find_study_session(
        tx: &mut Transaction<'static, Sqlite>,
        owner: &Owner,
        id: &str,
    ) -> Result<Option<StudySession>> {
        let row: Option<StudySessionRow> =
            sqlx::query_as(&format!("{SELECT_STUDY_SESSIONS} WHERE owner = ? AND id = ?"))
                .bind(owner.as_str())
                .bind(id)
                .fetch_optional(&mut **tx)
                .await
                .context("Failed to query study_sessions")?;
        row.map(study_session_from_row).transpose()
    }

    async fn find_todo(
        tx: &mut Transaction<'static, Sqlite>,
        owner: &Owner,
        id: &str,
    ) -> Result<Option<Todo>> {
        let row: Option<TodoRow> =
            sqlx::query_as(&format!("{SELECT_TODOS} WHERE owner = ? AND id = ?"))
                .bind(owner.as_str())
                .bind(id)
                .fetch_optional(&mut **tx)
                .await
                .context("Failed to query todos")?;
        row.map(todo_from_row).transpose()
    }
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    async fn expenses(&self, owner: &Owner) -> Result<Vec<Expense>> {
        let rows: Vec<ExpenseRow> =
            sqlx::query_as(&format!("{SELECT_EXPENSES} WHERE owner = ? {NEWEST_FIRST}"))
                .bind(owner.as_str())
                .fetch_all(&self.pool)
                .await
                .context("Failed to query expenses")?;
        rows.into_iter().map(expense_from_row).collect()
    }

    async fn study_sessions(&self, owner: &Owner) -> Result<Vec<StudySession>> {
        let rows: Vec<StudySessionRow> =
            sqlx::query_as(&format!("{SELECT_STUDY_SESSIONS} WHERE owner = ? {NEWEST_FIRST}"))
                .bind(owner.as_str())
                .fetch_all(&self.pool)
                .await
                .context("Failed to query study_sessions")?;
        rows.into_iter().map(study_session_from_row).collect()
    }

    async fn todos(&self, owner: &Owner) -> Result<Vec<Todo>> {
        let rows: Vec<TodoRow> =
            sqlx::query_as(&format!("{SELECT_TODOS} WHERE owner = ? {NEWEST_FIRST}"))
                .bind(owner.as_str())
                .fetch_all(&self.pool)
                .await
                .context("Failed to query todos")?;
        rows.into_iter().map(todo_from_row).collect()
    }

    async fn insert_expense(&self, owner: &Owner, new: NewExpense) -> Result<Expense> {
        let expense = Expense::from_new(utils::generate_id(), owner, new);
        sqlx::query(
            "INSERT INTO expenses (id, owner, category, amount, description, date, created_at) \
            VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(expense.id())
        .bind(owner.as_str())
        .bind(expense.category())
        .bind(expense.amount().as_str())
        .bind(expense.description())
        .bind(expense.date().to_string())
        .bind(now())
        .execute(&self.pool)
        .await
        .context("Failed to insert expense")?;
        trace!("Inserted expense {}", expense.id());
        Ok(expense)
    }

    async fn insert_study_session(
        &self,
        owner: &Owner,
        new: NewStudySession,
    ) -> Result<StudySession> {
        let session = StudySession::from_new(utils::generate_id(), owner, new);
        sqlx::query(
            "INSERT INTO study_sessions (id, owner, subject, hours, date, created_at) \
            VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(session.id())
        .bind(owner.as_str())
        .bind(session.subject())
        .bind(session.hours().as_str())
        .bind(session.date().to_string())
        .bind(now())
        .execute(&self.pool)
        .await
        .context("Failed to insert study session")?;
        trace!("Inserted study session {}", session.id());
        Ok(session)
    }

    async fn insert_todo(&self, owner: &Owner, new: NewTodo) -> Result<Todo> {
        let todo = Todo::from_new(utils::generate_id(), owner, new);
        sqlx::query(
            "INSERT INTO todos (id, owner, task, priority, status, due_time, created_at) \
            VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(todo.id())
        .bind(owner.as_str())
        .bind(todo.task())
        .bind(todo.priority().to_string())
        .bind(todo.status().to_string())
        .bind(todo.due_time())
        .bind(now())
        .execute(&self.pool)
        .await
        .context("Failed to insert todo")?;
        trace!("Inserted todo {}", todo.id());
        Ok(todo)
    }

    async fn update_expense(
        &self,
        owner: &Owner,
        id: &str,
        updates: &ExpenseUpdates,
    ) -> Result<Option<Expense>> {
        let mut tx = self.begin().await?;
        let Some(mut expense) = Self::find_expense(&mut tx, owner, id).await? else {
            debug!("No expense with id '{id}', nothing to update");
            return Ok(None);
        };
        expense.apply(updates);
        sqlx::query(
            "UPDATE expenses SET category = ?, amount = ?, description = ?, date = ? \
            WHERE owner = ? AND id = ?",
        )
        .bind(expense.category())
        .bind(expense.amount().as_str())
        .bind(expense.description())
        .bind(expense.date().to_string())
        .bind(owner.as_str())
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to update expense")?;
        tx.commit().await.context("Failed to commit transaction")?;
        Ok(Some(expense))
    }

    async fn update_study_session(
        &self,
        owner: &Owner,
        id: &str,
        updates: &StudySessionUpdates,
    ) -> Result<Option<StudySession>> {
        let mut tx = self.begin().await?;
        let Some(mut session) = Self::find_study_session(&mut tx, owner, id).await? else {
            debug!("No study session with id '{id}', nothing to update");
            return Ok(None);
        };
        session.apply(updates);
        sqlx::query(
            "UPDATE study_sessions SET subject = ?, hours = ?, date = ? WHERE owner = ? AND id = ?",
        )
        .bind(session.subject())
        .bind(session.hours().as_str())
        .bind(session.date().to_string())
        .bind(owner.as_str())
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to update study session")?;
        tx.commit().await.context("Failed to commit transaction")?;
        Ok(Some(session))
    }

    async fn update_todo(
        &self,
        owner: &Owner,
        id: &str,
        updates: &TodoUpdates,
    ) -> Result<Option<Todo>> {
        let mut tx = self.begin().await?;
        let Some(mut todo) = Self::find_todo(&mut tx, owner, id).await? else {
            debug!("No todo with id '{id}', nothing to update");
            return Ok(None);
        };
        todo.apply(updates);
        sqlx::query(
            "UPDATE todos SET task = ?, priority = ?, status = ?, due_time = ? \
            WHERE owner = ? AND id = ?",
        )
        .bind(todo.task())
        .bind(todo.priority().to_string())
        .bind(todo.status().to_string())
        .bind(todo.due_time())
        .bind(owner.as_str())
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to update todo")?;
        tx.commit().await.context("Failed to commit transaction")?;
        Ok(Some(todo))
    }

    async fn delete(&self, owner: &Owner, table: Table, id: &str) -> Result<bool> {
        // The table name comes from a closed enum, never from user input.
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE owner = ? AND id = ?"))
            .bind(owner.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete from {table}"))?;
        let deleted = result.rows_affected() > 0;
        if !deleted {
            debug!("No row with id '{id}' in {table}, nothing to delete");
        }
        Ok(deleted)
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{date}' in database"))
}

fn expense_from_row(row: ExpenseRow) -> Result<Expense> {
    let (id, owner, category, amount, description, date) = row;
    Ok(Expense {
        id,
        owner: Owner::new(owner),
        category,
        amount: NumericText::new(amount),
        description,
        date: parse_date(&date)?,
    })
}

fn study_session_from_row(row: StudySessionRow) -> Result<StudySession> {
    let (id, owner, subject, hours, date) = row;
    Ok(StudySession {
        id,
        owner: Owner::new(owner),
        subject,
        hours: NumericText::new(hours),
        date: parse_date(&date)?,
    })
}

fn todo_from_row(row: TodoRow) -> Result<Todo> {
    let (id, owner, task, priority, status, due_time) = row;
    Ok(Todo {
        id,
        owner: Owner::new(owner),
        task,
        priority: Priority::from_str(&priority)
            .with_context(|| format!("Invalid priority '{priority}' in database"))?,
        status: Status::from_str(&status)
            .with_context(|| format!("Invalid status '{status}' in database"))?,
        due_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn owner() -> Owner {
        Owner::new("u1")
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::init(dir.path().join("tracker.sqlite"))
            .await
            .unwrap();
        (dir, store)
    }

    fn new_expense(category: &str, amount: &str) -> NewExpense {
        NewExpense {
            category: category.to_string(),
            amount: NumericText::new(amount),
            description: Some("Lunch".to_string()),
            date: date("2025-06-02"),
        }
    }

    #[tokio::test]
    async fn test_init_refuses_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tracker.sqlite");
        SqliteStore::init(&path).await.unwrap();
        assert!(SqliteStore::init(&path).await.is_err());
        assert!(SqliteStore::load(&path).await.is_ok());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = SqliteStore::load(dir.path().join("nope.sqlite")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_expenses_newest_first() {
        let (_dir, store) = store().await;
        let first = store
            .insert_expense(&owner(), new_expense("Food", "150"))
            .await
            .unwrap();
        let second = store
            .insert_expense(&owner(), new_expense("Transport", "500"))
            .await
            .unwrap();
        let expenses = store.expenses(&owner()).await.unwrap();
        assert_eq!(expenses, vec![second, first]);
    }

    #[tokio::test]
    async fn test_records_persist_across_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tracker.sqlite");
        let store = SqliteStore::init(&path).await.unwrap();
        let session = store
            .insert_study_session(
                &owner(),
                NewStudySession {
                    subject: "Physics".to_string(),
                    hours: NumericText::new("2.5"),
                    date: date("2025-06-01"),
                },
            )
            .await
            .unwrap();
        drop(store);
        let store = SqliteStore::load(&path).await.unwrap();
        assert_eq!(store.study_sessions(&owner()).await.unwrap(), vec![session]);
    }

    #[tokio::test]
    async fn test_owner_scoping() {
        let (_dir, store) = store().await;
        let expense = store
            .insert_expense(&owner(), new_expense("Food", "150"))
            .await
            .unwrap();
        let other = Owner::new("u2");
        assert!(store.expenses(&other).await.unwrap().is_empty());
        let deleted = store
            .delete(&other, Table::Expenses, expense.id())
            .await
            .unwrap();
        assert!(!deleted);
        let updates = ExpenseUpdates {
            category: Some("Stolen".to_string()),
            ..Default::default()
        };
        let updated = store
            .update_expense(&other, expense.id(), &updates)
            .await
            .unwrap();
        assert_eq!(updated, None);
        assert_eq!(store.expenses(&owner()).await.unwrap(), vec![expense]);
    }

    #[tokio::test]
    async fn test_update_expense() {
        let (_dir, store) = store().await;
        let expense = store
            .insert_expense(&owner(), new_expense("Food", "150"))
            .await
            .unwrap();
        let updates = ExpenseUpdates {
            amount: Some(NumericText::new("175.5")),
            description: Some(String::new()),
            ..Default::default()
        };
        let updated = store
            .update_expense(&owner(), expense.id(), &updates)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.amount().as_str(), "175.5");
        assert_eq!(updated.description(), None);
        assert_eq!(updated.category(), "Food");
        assert_eq!(store.expenses(&owner()).await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn test_update_missing_is_none() {
        let (_dir, store) = store().await;
        let updated = store
            .update_todo(&owner(), "nope", &TodoUpdates::with_status(Status::Completed))
            .await
            .unwrap();
        assert_eq!(updated, None);
        assert!(store.todos(&owner()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_todo_round_trip_and_toggle() {
        let (_dir, store) = store().await;
        let todo = store
            .insert_todo(
                &owner(),
                NewTodo {
                    task: "Read Chapter 4".to_string(),
                    priority: Priority::High,
                    due_time: Some("Friday".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(todo.status(), Status::Pending);
        let toggled = store
            .update_todo(
                &owner(),
                todo.id(),
                &TodoUpdates::with_status(todo.status().toggled()),
            )
            .await
            .unwrap()
            .unwrap();
        assert!(toggled.is_completed());
        let todos = store.todos(&owner()).await.unwrap();
        assert_eq!(todos[0].priority(), Priority::High);
        assert!(todos[0].is_completed());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_dir, store) = store().await;
        let keep = store
            .insert_expense(&owner(), new_expense("Food", "1"))
            .await
            .unwrap();
        let gone = store
            .insert_expense(&owner(), new_expense("Food", "2"))
            .await
            .unwrap();
        let deleted = store
            .delete(&owner(), Table::Expenses, gone.id())
            .await
            .unwrap();
        assert!(deleted);
        assert_eq!(store.expenses(&owner()).await.unwrap(), vec![keep.clone()]);
        let deleted = store
            .delete(&owner(), Table::Expenses, gone.id())
            .await
            .unwrap();
        assert!(!deleted);
        assert_eq!(store.expenses(&owner()).await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn test_unparseable_amount_is_kept() {
        let (_dir, store) = store().await;
        store
            .insert_expense(&owner(), new_expense("Food", "abc"))
            .await
            .unwrap();
        let expenses = store.expenses(&owner()).await.unwrap();
        assert_eq!(expenses[0].amount().as_str(), "abc");
        assert!(expenses[0].amount().value().is_nan());
    }
}
