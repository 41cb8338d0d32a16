use crate::model::{non_empty, Owner, Record};
use serde::{Deserialize, Serialize};

/// How urgent a todo is.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

serde_plain::derive_display_from_serialize!(Priority);
serde_plain::derive_fromstr_from_deserialize!(Priority);

/// Whether a todo has been done.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Completed,
}

serde_plain::derive_display_from_serialize!(Status);
serde_plain::derive_fromstr_from_deserialize!(Status);

impl Status {
    /// The status a checkbox click moves to.
    pub fn toggled(self) -> Self {
        match self {
            Status::Pending => Status::Completed,
            Status::Completed => Status::Pending,
        }
    }
}

/// A task on the todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Todo {
    pub(crate) id: String,
    #[serde(rename = "user_id")]
    pub(crate) owner: Owner,
    pub(crate) task: String,
    #[serde(default)]
    pub(crate) priority: Priority,
    #[serde(default)]
    pub(crate) status: Status,
    /// Free text such as "Today 5pm"; only ever displayed.
    #[serde(default)]
    pub(crate) due_time: Option<String>,
}

impl Todo {
    pub(crate) fn from_new(id: impl Into<String>, owner: &Owner, new: NewTodo) -> Self {
        Self {
            id: id.into(),
            owner: owner.clone(),
            task: new.task,
            priority: new.priority,
            status: Status::Pending,
            due_time: new.due_time.as_deref().and_then(non_empty),
        }
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    pub fn due_time(&self) -> Option<&str> {
        self.due_time.as_deref()
    }
}

impl Record for Todo {
    type Updates = TodoUpdates;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, updates: &TodoUpdates) {
        if let Some(task) = &updates.task {
            self.task = task.clone();
        }
        if let Some(priority) = updates.priority {
            self.priority = priority;
        }
        if let Some(status) = updates.status {
            self.status = status;
        }
        if let Some(due_time) = &updates.due_time {
            self.due_time = non_empty(due_time);
        }
    }
}

/// New todos always start out pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub task: String,
    pub priority: Priority,
    pub due_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdates {
    pub task: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub due_time: Option<String>,
}

impl TodoUpdates {
    pub fn is_empty(&self) -> bool {
        self.task.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_time.is_none()
    }

    /// A patch that only changes the status.
    pub fn with_status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
