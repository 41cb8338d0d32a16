//! Schema migrations for the SQLite store.
//!
//! `MIGRATIONS[n]` holds the SQL that takes the schema from version `n` to `n + 1` and back again,
//! read from `migration_NN_up.sql` / `migration_NN_down.sql` in this directory. The version a
//! database is at lives in the one-row `schema_version` table; a database without that row is at
//! version 0.

use crate::Result;
use anyhow::{bail, Context};
use sqlx::{Executor, SqlitePool};
use std::fmt::{self, Display, Formatter};
use tracing::debug;

/// The schema version this build of the crate expects.
pub(crate) const CURRENT_VERSION: i32 = 1;

struct Migration {
    up: &'static str,
    down: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    up: include_str!("migration_01_up.sql"),
    down: include_str!("migration_01_down.sql"),
}];

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Direction {
    Up,
    Down,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
        })
    }
}

/// One migration script and the version the schema is at once it has run.
#[derive(Debug, Clone, Copy)]
struct Step {
    direction: Direction,
    sql: &'static str,
    lands_on: i32,
}

/// Brings the database up to `CURRENT_VERSION` and returns the version it ended at. Refuses a
/// database written by a newer build rather than downgrading it.
pub(crate) async fn migrate(pool: &SqlitePool) -> Result<i32> {
    let version = current_version(pool).await?;
    if version > CURRENT_VERSION {
        bail!(
            "The database is at schema version {version}, but this build only knows up to \
            {CURRENT_VERSION}"
        );
    }
    run(pool, version, CURRENT_VERSION).await?;
    Ok(CURRENT_VERSION)
}

/// Creates `schema_version` if needed and returns the version recorded in it.
pub(crate) async fn current_version(pool: &SqlitePool) -> Result<i32> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_version (\
            id INTEGER PRIMARY KEY CHECK (id = 1), \
            version INTEGER NOT NULL)",
    )
    .execute(pool)
    .await
    .context("Failed to create schema_version table")?;
    let row: Option<(i32,)> = sqlx::query_as("SELECT version FROM schema_version WHERE id = 1")
        .fetch_optional(pool)
        .await
        .context("Failed to query schema version")?;
    Ok(row.map_or(0, |(version,)| version))
}

/// Moves the schema from `from` to `to`. The whole route is planned before anything runs, so a
/// gap in the available migrations leaves the database untouched.
pub(crate) async fn run(pool: &SqlitePool, from: i32, to: i32) -> Result<()> {
    let steps = plan(from, to)?;
    if steps.is_empty() {
        debug!("Schema already at version {to}");
        return Ok(());
    }
    for step in steps {
        debug!("Migrating {} to schema version {}", step.direction, step.lands_on);
        apply(pool, step).await?;
    }
    Ok(())
}

/// The scripts to run, in order, to get from version `from` to version `to`.
fn plan(from: i32, to: i32) -> Result<Vec<Step>> {
    if from <= to {
        (from + 1..=to)
            .map(|version| -> Result<Step> {
                Ok(Step {
                    direction: Direction::Up,
                    sql: migration_to(version, from, to)?.up,
                    lands_on: version,
                })
            })
            .collect()
    } else {
        (to + 1..=from)
            .rev()
            .map(|version| -> Result<Step> {
                Ok(Step {
                    direction: Direction::Down,
                    sql: migration_to(version, from, to)?.down,
                    lands_on: version - 1,
                })
            })
            .collect()
    }
}

/// The migration between `version - 1` and `version`.
fn migration_to(version: i32, from: i32, to: i32) -> Result<&'static Migration> {
    usize::try_from(version - 1)
        .ok()
        .and_then(|index| MIGRATIONS.get(index))
        .with_context(|| {
            format!("No migration for schema version {version}, needed to go from {from} to {to}")
        })
}

/// Runs one script and records its resulting version in the same transaction.
async fn apply(pool: &SqlitePool, step: Step) -> Result<()> {
    let mut tx = pool
        .begin()
        .await
        .context("Failed to begin migration transaction")?;
    tx.execute(step.sql)
        .await
        .with_context(|| format!("Migration to schema version {} failed", step.lands_on))?;
    sqlx::query(
        "INSERT INTO schema_version (id, version) VALUES (1, ?) \
        ON CONFLICT (id) DO UPDATE SET version = excluded.version",
    )
    .bind(step.lands_on)
    .execute(&mut *tx)
    .await
    .context("Failed to record schema version")?;
    tx.commit()
        .await
        .context("Failed to commit migration transaction")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use tempfile::TempDir;

    async fn pool() -> (TempDir, SqlitePool) {
        let dir = TempDir::new().unwrap();
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("schema.sqlite"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        (dir, pool)
    }

    async fn tables(pool: &SqlitePool) -> Vec<String> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name != 'schema_version' \
            ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .unwrap();
        rows.into_iter().map(|(name,)| name).collect()
    }

    #[test]
    fn test_plan_up_and_down() {
        let up = plan(0, 1).unwrap();
        assert_eq!(up.len(), 1);
        assert_eq!(up[0].direction, Direction::Up);
        assert_eq!(up[0].lands_on, 1);
        assert!(up[0].sql.contains("CREATE TABLE expenses"));

        let down = plan(1, 0).unwrap();
        assert_eq!(down[0].direction, Direction::Down);
        assert_eq!(down[0].lands_on, 0);
        assert!(down[0].sql.contains("DROP TABLE IF EXISTS expenses"));

        assert!(plan(1, 1).unwrap().is_empty());
    }

    #[test]
    fn test_plan_with_a_gap_fails() {
        let err = plan(0, 2).unwrap_err();
        assert!(err.to_string().contains("No migration for schema version 2"));
        assert!(plan(3, 1).is_err());
    }

    #[tokio::test]
    async fn test_migrate_fresh_database() {
        let (_dir, pool) = pool().await;
        assert_eq!(current_version(&pool).await.unwrap(), 0);
        assert_eq!(migrate(&pool).await.unwrap(), CURRENT_VERSION);
        assert_eq!(current_version(&pool).await.unwrap(), CURRENT_VERSION);
        assert_eq!(tables(&pool).await, vec!["expenses", "study_sessions", "todos"]);

        // A second pass finds nothing to do.
        assert_eq!(migrate(&pool).await.unwrap(), CURRENT_VERSION);
    }

    #[tokio::test]
    async fn test_down_drops_tables() {
        let (_dir, pool) = pool().await;
        migrate(&pool).await.unwrap();
        run(&pool, CURRENT_VERSION, 0).await.unwrap();
        assert_eq!(current_version(&pool).await.unwrap(), 0);
        assert!(tables(&pool).await.is_empty());
    }

    #[tokio::test]
    async fn test_newer_database_is_refused() {
        let (_dir, pool) = pool().await;
        current_version(&pool).await.unwrap();
        sqlx::query("INSERT INTO schema_version (id, version) VALUES (1, 9)")
            .execute(&pool)
            .await
            .unwrap();
        let err = migrate(&pool).await.unwrap_err();
        assert!(err.to_string().contains("schema version 9"));
        assert!(tables(&pool).await.is_empty());
    }
}
