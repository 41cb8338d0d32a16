//! Types that represent the core data model: `Expense`, `StudySession` and `Todo`, along with the
//! payloads used to create and patch them.
mod category;
mod expense;
mod numeric;
mod owner;
mod study_session;
mod todo;

pub use category::{category_color, KnownCategory, FALLBACK_COLOR};
pub use expense::{Expense, ExpenseUpdates, NewExpense};
pub use numeric::NumericText;
pub use owner::Owner;
use serde::{Deserialize, Serialize};
pub use study_session::{NewStudySession, StudySession, StudySessionUpdates};
pub use todo::{NewTodo, Priority, Status, Todo, TodoUpdates};

/// A persisted row that can be found by id and patched in place.
pub trait Record: Clone {
    /// The partial field set used to edit this kind of record.
    type Updates;

    /// The identifier assigned by the store when the record was created.
    fn id(&self) -> &str;

    /// Overwrite the fields that are present in `updates`, leaving the others alone.
    fn apply(&mut self, updates: &Self::Updates);
}

/// The three tables that hold a user's records.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Expenses,
    StudySessions,
    Todos,
}

serde_plain::derive_display_from_serialize!(Table);
serde_plain::derive_fromstr_from_deserialize!(Table);

/// Turns an empty string into `None`. Optional text fields use an empty value to mean "clear".
pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
