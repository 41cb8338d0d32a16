use crate::model::NumericText;
use crate::Result;
use anyhow::Context;
use format_num::format_num;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Write a file.
pub(crate) async fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    tokio::fs::write(path, contents)
        .await
        .context(format!("Unable to write to {}", path.to_string_lossy()))
}

/// Read a file to a `String`.
pub(crate) async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file at {}", path.display()))
}

/// Create a directory and any missing parents. Succeeds if it already exists.
pub(crate) async fn make_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Unable to create directory {}", path.display()))
}

pub(crate) async fn canonicalize(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    tokio::fs::canonicalize(path)
        .await
        .with_context(|| format!("Unable to resolve path {}", path.display()))
}

/// A fresh record id.
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parses a CLI amount or hour count. Only non-negative decimals are accepted, and they are stored
/// in normalized form, e.g. `150.00` becomes `150`.
pub(crate) fn parse_non_negative(s: &str) -> std::result::Result<NumericText, String> {
    NumericText::new(s)
        .validate()
        .map(NumericText::from)
        .map_err(|e| e.to_string())
}

/// Formats a money amount with thousands separators and two decimals, e.g. `1,200.00`.
pub(crate) fn fmt_money(value: f64) -> String {
    if value.is_finite() {
        format_num!(",.2", value)
    } else {
        "NaN".to_string()
    }
}

/// Formats an hour count with at most one decimal, e.g. `4.5` or `2`.
pub(crate) fn fmt_hours(value: f64) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}
