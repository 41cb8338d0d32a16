//! Track a student's expenses, study sessions and todos, and summarize them into a dashboard.

pub mod aggregate;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod motivation;
pub mod reconcile;
pub mod store;
pub mod tracker;
mod utils;


pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use store::Mode;
pub use tracker::Tracker;
