//! Implements the `Store` trait with in-memory data.
//!
//! Note: this is compiled into the release binary too, so that the whole app can be run
//! top-to-bottom in demo mode without touching the SQLite file.

use crate::model::{
    Expense, ExpenseUpdates, NewExpense, NewStudySession, NewTodo, NumericText, Owner, Priority,
    Record, Status, StudySession, StudySessionUpdates, Table, Todo, TodoUpdates,
};
use crate::store::{Collections, Store};
use crate::{reconcile, utils, Result};
use anyhow::bail;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tokio::sync::Mutex;

/// Holds the records of every owner in memory, newest first.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Collections>,
    failing: Mutex<BTreeSet<Table>>,
}

impl MemoryStore {
    pub fn new(data: Collections) -> Self {
        Self {
            data: Mutex::new(data),
            failing: Mutex::new(BTreeSet::new()),
        }
    }

    /// A store seeded with a few sample records belonging to `owner`.
    pub fn demo(owner: &Owner) -> Self {
        Self::new(demo_data(owner))
    }

    /// Makes every later operation on `table` fail, as an unreachable server would.
    #[cfg(test)]
    pub(crate) async fn fail_on(&self, table: Table) {
        self.failing.lock().await.insert(table);
    }

    async fn check(&self, table: Table) -> Result<()> {
        if self.failing.lock().await.contains(&table) {
            bail!("The {table} table is unavailable");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn expenses(&self, owner: &Owner) -> Result<Vec<Expense>> {
        self.check(Table::Expenses).await?;
        let data = self.data.lock().await;
        Ok(owned_by(&data.expenses, owner, |e| e.owner()))
    }

    async fn study_sessions(&self, owner: &Owner) -> Result<Vec<StudySession>> {
        self.check(Table::StudySessions).await?;
        let data = self.data.lock().await;
        Ok(owned_by(&data.study_sessions, owner, |s| s.owner()))
    }

    async fn todos(&self, owner: &Owner) -> Result<Vec<Todo>> {
        self.check(Table::Todos).await?;
        let data = self.data.lock().await;
        Ok(owned_by(&data.todos, owner, |t| t.owner()))
    }

    async fn insert_expense(&self, owner: &Owner, new: NewExpense) -> Result<Expense> {
        self.check(Table::Expenses).await?;
        let expense = Expense::from_new(utils::generate_id(), owner, new);
        let mut data = self.data.lock().await;
        data.expenses = reconcile::insert(&data.expenses, expense.clone());
        Ok(expense)
    }

    async fn insert_study_session(
        &self,
        owner: &Owner,
        new: NewStudySession,
    ) -> Result<StudySession> {
        self.check(Table::StudySessions).await?;
        let session = StudySession::from_new(utils::generate_id(), owner, new);
        let mut data = self.data.lock().await;
        data.study_sessions = reconcile::insert(&data.study_sessions, session.clone());
        Ok(session)
    }

    async fn insert_todo(&self, owner: &Owner, new: NewTodo) -> Result<Todo> {
        self.check(Table::Todos).await?;
        let todo = Todo::from_new(utils::generate_id(), owner, new);
        let mut data = self.data.lock().await;
        data.todos = reconcile::insert(&data.todos, todo.clone());
        Ok(todo)
    }

    async fn update_expense(
        &self,
        owner: &Owner,
        id: &str,
        updates: &ExpenseUpdates,
    ) -> Result<Option<Expense>> {
        self.check(Table::Expenses).await?;
        let mut data = self.data.lock().await;
        Ok(update_owned(&mut data.expenses, owner, id, updates, |e| e.owner()))
    }

    async fn update_study_session(
        &self,
        owner: &Owner,
        id: &str,
        updates: &StudySessionUpdates,
    ) -> Result<Option<StudySession>> {
        self.check(Table::StudySessions).await?;
        let mut data = self.data.lock().await;
        Ok(update_owned(&mut data.study_sessions, owner, id, updates, |s| s.owner()))
    }

    async fn update_todo(
        &self,
        owner: &Owner,
        id: &str,
        updates: &TodoUpdates,
    ) -> Result<Option<Todo>> {
        self.check(Table::Todos).await?;
        let mut data = self.data.lock().await;
        Ok(update_owned(&mut data.todos, owner, id, updates, |t| t.owner()))
    }

    async fn delete(&self, owner: &Owner, table: Table, id: &str) -> Result<bool> {
        self.check(table).await?;
        let mut data = self.data.lock().await;
        Ok(match table {
            Table::Expenses => delete_owned(&mut data.expenses, owner, id, |e| e.owner()),
            Table::StudySessions => {
                delete_owned(&mut data.study_sessions, owner, id, |s| s.owner())
            }
            Table::Todos => delete_owned(&mut data.todos, owner, id, |t| t.owner()),
        })
    }
}

fn owned_by<R, F>(records: &[R], owner: &Owner, owner_of: F) -> Vec<R>
where
    R: Record,
    F: Fn(&R) -> &Owner,
{
    records
        .iter()
        .filter(|r| owner_of(r) == owner)
        .cloned()
        .collect()
}

/// Patches the owner's record with `id`. Records with the same id under another owner are left
/// alone.
fn update_owned<R, F>(
    records: &mut [R],
    owner: &Owner,
    id: &str,
    updates: &R::Updates,
    owner_of: F,
) -> Option<R>
where
    R: Record,
    F: Fn(&R) -> &Owner,
{
    let record = records
        .iter_mut()
        .find(|r| r.id() == id && owner_of(r) == owner)?;
    record.apply(updates);
    Some(record.clone())
}

/// Removes the owner's record with `id` and reports whether there was one.
fn delete_owned<R, F>(records: &mut Vec<R>, owner: &Owner, id: &str, owner_of: F) -> bool
where
    R: Record,
    F: Fn(&R) -> &Owner,
{
    let before = records.len();
    records.retain(|r| r.id() != id || owner_of(r) != owner);
    records.len() != before
}

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap_or_default()
}

/// Sample records shown in demo mode.
fn demo_data(owner: &Owner) -> Collections {
    let expense = |id: &str, category: &str, amount: &str, description: &str, day: u32| Expense {
        id: id.to_string(),
        owner: owner.clone(),
        category: category.to_string(),
        amount: NumericText::new(amount),
        description: Some(description.to_string()),
        date: june(day),
    };
    let session = |id: &str, subject: &str, hours: &str, day: u32| StudySession {
        id: id.to_string(),
        owner: owner.clone(),
        subject: subject.to_string(),
        hours: NumericText::new(hours),
        date: june(day),
    };
    let todo = |id: &str, task: &str, due: &str, priority: Priority, status: Status| Todo {
        id: id.to_string(),
        owner: owner.clone(),
        task: task.to_string(),
        priority,
        status,
        due_time: Some(due.to_string()),
    };
    Collections {
        expenses: vec![
            expense("demo-expense-1", "Education", "1200", "Books & Supplies", 1),
            expense("demo-expense-2", "Food", "150", "Coffee", 2),
            expense("demo-expense-3", "Transport", "500", "Bus Pass", 3),
        ],
        study_sessions: vec![
            session("demo-session-1", "Physics", "2", 1),
            session("demo-session-2", "History", "1.5", 2),
            session("demo-session-3", "Mathematics", "3", 3),
        ],
        todos: vec![
            todo(
                "demo-todo-1",
                "Finish Math Assignment",
                "Today 5pm",
                Priority::High,
                Status::Pending,
            ),
            todo(
                "demo-todo-2",
                "Read Chapter 4",
                "Tomorrow",
                Priority::Medium,
                Status::Completed,
            ),
            todo(
                "demo-todo-3",
                "Group Project Meeting",
                "Friday",
                Priority::High,
                Status::Pending,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Owner {
        Owner::new("u1")
    }

    #[tokio::test]
    async fn test_insert_prepends_and_assigns_id() {
        let store = MemoryStore::demo(&owner());
        let created = store
            .insert_study_session(
                &owner(),
                NewStudySession {
                    subject: "Chemistry".to_string(),
                    hours: NumericText::new("1"),
                    date: june(4),
                },
            )
            .await
            .unwrap();
        assert!(!created.id().is_empty());
        let sessions = store.study_sessions(&owner()).await.unwrap();
        assert_eq!(sessions.len(), 4);
        assert_eq!(sessions[0], created);
    }

    #[tokio::test]
    async fn test_update_todo() {
        let store = MemoryStore::demo(&owner());
        let updated = store
            .update_todo(&owner(), "demo-todo-1", &TodoUpdates::with_status(Status::Completed))
            .await
            .unwrap()
            .unwrap();
        assert!(updated.is_completed());
        let todos = store.todos(&owner()).await.unwrap();
        assert!(todos[0].is_completed());
    }

    #[tokio::test]
    async fn test_update_missing_is_none() {
        let store = MemoryStore::demo(&owner());
        let before = store.expenses(&owner()).await.unwrap();
        let updated = store
            .update_expense(&owner(), "nope", &ExpenseUpdates::default())
            .await
            .unwrap();
        assert_eq!(updated, None);
        assert_eq!(store.expenses(&owner()).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_other_owner_is_none() {
        let store = MemoryStore::demo(&owner());
        let updated = store
            .update_expense(
                &Owner::new("intruder"),
                "demo-expense-1",
                &ExpenseUpdates::default(),
            )
            .await
            .unwrap();
        assert_eq!(updated, None);
    }

    #[tokio::test]
    async fn test_shared_id_only_touches_the_callers_record() {
        let mut data = demo_data(&owner());
        let other = Owner::new("u2");
        data.todos.extend(demo_data(&other).todos);
        let store = MemoryStore::new(data);

        let updated = store
            .update_todo(&owner(), "demo-todo-1", &TodoUpdates::with_status(Status::Completed))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.owner(), &owner());
        let theirs = store.todos(&other).await.unwrap();
        assert_eq!(theirs[0].status(), Status::Pending);

        assert!(store
            .delete(&owner(), Table::Todos, "demo-todo-2")
            .await
            .unwrap());
        assert_eq!(store.todos(&owner()).await.unwrap().len(), 2);
        assert_eq!(store.todos(&other).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::demo(&owner());
        let deleted = store
            .delete(&owner(), Table::Expenses, "demo-expense-2")
            .await
            .unwrap();
        assert!(deleted);
        let expenses = store.expenses(&owner()).await.unwrap();
        let ids: Vec<&str> = expenses.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["demo-expense-1", "demo-expense-3"]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = MemoryStore::demo(&owner());
        let deleted = store
            .delete(&owner(), Table::Todos, "demo-expense-1")
            .await
            .unwrap();
        assert!(!deleted);
        assert_eq!(store.todos(&owner()).await.unwrap().len(), 3);
        assert_eq!(store.expenses(&owner()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failing_table() {
        let store = MemoryStore::demo(&owner());
        store.fail_on(Table::Todos).await;
        assert!(store.todos(&owner()).await.is_err());
        assert!(store.expenses(&owner()).await.is_ok());
        let before = store.data.lock().await.todos.clone();
        let result = store.delete(&owner(), Table::Todos, "demo-todo-1").await;
        assert!(result.is_err());
        assert_eq!(store.data.lock().await.todos, before);
    }

    #[test]
    fn test_demo_dates() {
        assert_eq!(june(1), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }
}
