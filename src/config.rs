//! Configuration file handling for the tracker.
//!
//! The configuration file is stored at `$TRACKER_HOME/config.json` and names the owner whose
//! records the CLI works with, an optional display name for the dashboard greeting, and the
//! location of the SQLite database.

use crate::model::Owner;
use crate::store::SqliteStore;
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "tracker";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const TRACKER_SQLITE: &str = "tracker.sqlite";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$TRACKER_HOME` and from there it loads `$TRACKER_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    owner: Owner,
    sqlite_path: PathBuf,
}

impl Config {
    /// Creates the home directory, writes an initial `config.json` and creates the SQLite
    /// database.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the tracker home, e.g. `$HOME/tracker`
    /// - `owner` - The user id that every record will be stored under
    /// - `display_name` - Shown in the dashboard greeting
    ///
    /// # Errors
    /// - Returns an error if any file operations fail or if a database already exists.
    pub async fn create(
        dir: impl Into<PathBuf>,
        owner: &str,
        display_name: Option<&str>,
    ) -> Result<Self> {
        let owner = owner.trim();
        ensure!(!owner.is_empty(), "The owner must not be empty");

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the tracker home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            );
        }

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            owner: owner.to_string(),
            display_name: display_name
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            sqlite_path: None,
        };

        let sqlite_path = resolve(&root, config_file.sqlite_path());
        SqliteStore::init(&sqlite_path)
            .await
            .context("Unable to create SQLite DB")?;
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            owner: Owner::new(owner),
            config_file,
            sqlite_path,
        })
    }

    /// This will
    /// - validate that `tracker_home` exists and that the config file exists
    /// - load and validate the config file
    /// - return the loaded configuration object
    ///
    /// The database itself is opened later, by the store.
    pub async fn load(tracker_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = tracker_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Tracker Home is missing")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let sqlite_path = resolve(&root, config_file.sqlite_path());

        Ok(Self {
            root,
            config_path,
            owner: Owner::new(config_file.owner.clone()),
            config_file,
            sqlite_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn display_name(&self) -> Option<&str> {
        self.config_file.display_name.as_deref()
    }

    pub fn sqlite_path(&self) -> &Path {
        &self.sqlite_path
    }
}

fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        p
    } else {
        root.join(p)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "tracker",
///   "config_version": 1,
///   "owner": "5b1e0a52-7f0c-4c6e-9d43-0c1f2d9a8b77",
///   "display_name": "Ada Lovelace",
///   "sqlite_path": "tracker.sqlite"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "tracker"
    app_name: String,

    config_version: u8,

    /// The user id that records are stored under
    owner: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,

    /// Relative to the tracker home directory, or absolute. Defaults to `tracker.sqlite`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sqlite_path: Option<PathBuf>,
}

impl ConfigFile {
    /// Loads a ConfigFile from `path` and checks that it belongs to this app.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;
        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            !config.owner.trim().is_empty(),
            "The config file at {} has an empty owner",
            path.display()
        );

        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data)
            .await
            .context("Unable to write config file")
    }

    fn sqlite_path(&self) -> PathBuf {
        self.sqlite_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(TRACKER_SQLITE))
    }
}
