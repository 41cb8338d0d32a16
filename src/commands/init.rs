use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the tracker home directory with:
/// - an initial `config.json` naming `owner` and, optionally, `display_name`
/// - an empty SQLite database with the current schema
///
/// # Errors
/// - Returns an error if the directory already holds a config or database, or if any file
///   operation fails.
pub async fn init(tracker_home: &Path, owner: &str, display_name: Option<&str>) -> Result<Out<()>> {
    let config = Config::create(tracker_home, owner, display_name)
        .await
        .context("Unable to create the data directory and configs")?;
    Ok(format!(
        "Successfully created the tracker directory at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("tracker");
        let out = init(&home, "u1", Some("Ada")).await.unwrap();
        assert!(out.message().starts_with("Successfully created"));
        let config = Config::load(&home).await.unwrap();
        assert_eq!(config.owner().as_str(), "u1");
        assert_eq!(config.display_name(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_init_twice_fails() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), "u1", None).await.unwrap();
        let err = init(dir.path(), "u1", None).await.unwrap_err();
        assert!(err.to_string().contains("Unable to create"));
    }
}
