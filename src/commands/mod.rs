//! Command handlers for the tracker CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod dashboard;
mod delete;
mod init;
mod insert;
mod list;
mod update;

use crate::store::{self, Mode};
use crate::tracker::Tracker;
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use dashboard::{dashboard, Dashboard};
pub use delete::delete;
pub use init::init;
pub use insert::{insert_expense, insert_study_session, insert_todo};
pub use list::{list, Listing};
pub use update::{toggle, update_expense, update_study_session, update_todo};

/// The output type for a command. The message is what the user reads; the structure is the same
/// result as data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Opens the store for `mode` and loads the configured owner's records.
async fn session(config: &Config, mode: Mode) -> Result<Tracker> {
    let store = store::open(config, mode).await?;
    Ok(Tracker::load(store, config.owner().clone()).await)
}

/// `"1 todo"`, `"2 todos"`.
fn plural(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", if count == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(0, "todo"), "0 todos");
        assert_eq!(plural(1, "expense"), "1 expense");
        assert_eq!(plural(3, "study session"), "3 study sessions");
    }

    #[test]
    fn test_out() {
        let out: Out<u8> = "done".into();
        assert_eq!(out.message(), "done");
        assert!(out.structure().is_none());
        let out = Out::new("seven", 7u8);
        assert_eq!(out.structure(), Some(&7));
    }
}
