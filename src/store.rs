//! SQLite storage backend for task rows.
//!
//! [`TaskStore`] owns the single process-wide connection; it is constructed
//! once at startup and passed into the repository (no ambient globals).
//! Multi-statement mutations go through [`TaskStore::transaction`] so a
//! reindexing sequence commits or rolls back as a unit.

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, Row, ToSql, Transaction};
use tracing::debug;

use crate::error::Result;
use crate::task::{Status, Task, TaskPatch};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS task_table (
    task text,
    category varchar,
    date_added timestamp,
    date_completed timestamp,
    status smallint,
    position smallint
)";

const INSERT: &str = "INSERT INTO task_table
    (task, category, date_added, date_completed, status, position)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_ALL: &str = "SELECT task, category, date_added, date_completed, status, position
    FROM task_table ORDER BY position ASC";

const COUNT: &str = "SELECT COUNT(*) FROM task_table";
const DELETE_AT: &str = "DELETE FROM task_table WHERE position = ?1";
const DELETE_ALL: &str = "DELETE FROM task_table";
const SET_POSITION: &str = "UPDATE task_table SET position = ?1 WHERE position = ?2";

/// Durable storage for task rows, keyed by position.
pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    /// Open (or create) the database at `path` and ensure the schema.
    ///
    /// The parent directory is created on first run.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %path.display(), "opening task database");
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open an in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Idempotently create the task table.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute(SCHEMA, [])?;
        Ok(())
    }

    /// Number of stored tasks.
    pub fn count(&self) -> Result<i64> {
        count(&self.conn)
    }

    /// Append one row. Position uniqueness is the repository's guarantee.
    pub fn insert(&self, task: &Task) -> Result<()> {
        insert(&self.conn, task)
    }

    /// Full scan ordered by position ascending, optionally filtered by status.
    ///
    /// Produces a fresh `Vec` per call, never a live cursor.
    pub fn select_all(&self, status: Option<Status>) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;
        let rows = stmt.query_map([], task_from_row)?;
        let mut tasks = Vec::new();
        for row in rows {
            let task = row?;
            if status.is_none_or(|s| task.status == s) {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    /// Apply a patch to the row at `position`. Returns the affected-row count.
    pub fn update_fields(&self, position: i64, patch: &TaskPatch) -> Result<usize> {
        update_fields(&self.conn, position, patch)
    }

    /// Remove the row at `position`. Returns the affected-row count.
    pub fn delete(&self, position: i64) -> Result<usize> {
        delete(&self.conn, position)
    }

    /// Remove every row. Positions are trivially contiguous afterwards.
    pub fn delete_all(&self) -> Result<()> {
        debug!("wiping task table");
        self.conn.execute(DELETE_ALL, [])?;
        Ok(())
    }

    /// Begin a scoped transaction over the same row primitives.
    ///
    /// Dropping the guard without [`StoreTx::commit`] rolls back.
    pub fn transaction(&mut self) -> Result<StoreTx<'_>> {
        Ok(StoreTx {
            tx: self.conn.transaction()?,
        })
    }
}

/// Transaction guard exposing the row primitives used by reindexing.
pub struct StoreTx<'a> {
    tx: Transaction<'a>,
}

impl StoreTx<'_> {
    pub fn count(&self) -> Result<i64> {
        count(&self.tx)
    }

    pub fn insert(&self, task: &Task) -> Result<()> {
        insert(&self.tx, task)
    }

    pub fn delete(&self, position: i64) -> Result<usize> {
        delete(&self.tx, position)
    }

    /// Relabel the row at `from` with position `to`.
    ///
    /// The caller is responsible for orderings that never produce two rows
    /// with the same position at a commit point.
    pub fn set_position(&self, from: i64, to: i64) -> Result<()> {
        self.tx.execute(SET_POSITION, params![to, from])?;
        Ok(())
    }

    pub fn update_fields(&self, position: i64, patch: &TaskPatch) -> Result<usize> {
        update_fields(&self.tx, position, patch)
    }

    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }
}

fn count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row(COUNT, [], |row| row.get(0))?)
}

fn insert(conn: &Connection, task: &Task) -> Result<()> {
    debug!(position = task.position, "inserting task row");
    conn.execute(
        INSERT,
        params![
            task.description,
            task.category,
            task.created_at,
            task.completed_at,
            task.status.as_sql(),
            task.position,
        ],
    )?;
    Ok(())
}

fn delete(conn: &Connection, position: i64) -> Result<usize> {
    debug!(position, "deleting task row");
    Ok(conn.execute(DELETE_AT, params![position])?)
}

/// Build and run a parameterized `UPDATE` from a patch.
///
/// Column names come from a fixed whitelist; user-controlled text is only
/// ever bound as a parameter.
fn update_fields(conn: &Connection, position: i64, patch: &TaskPatch) -> Result<usize> {
    if patch.is_empty() {
        return Ok(0);
    }

    let mut columns: Vec<&'static str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(ref description) = patch.description {
        columns.push("task = ?");
        values.push(Box::new(description.clone()));
    }
    if let Some(ref category) = patch.category {
        columns.push("category = ?");
        values.push(Box::new(category.clone()));
    }
    if let Some(status) = patch.status {
        columns.push("status = ?");
        values.push(Box::new(status.as_sql()));
    }
    if let Some(completed_at) = patch.completed_at {
        columns.push("date_completed = ?");
        values.push(Box::new(completed_at));
    }
    values.push(Box::new(position));

    let sql = format!(
        "UPDATE task_table SET {} WHERE position = ?",
        columns.join(", ")
    );
    debug!(position, fields = columns.len(), "updating task row");

    let params: Vec<&dyn ToSql> = values.iter().map(|value| value.as_ref()).collect();
    Ok(conn.execute(&sql, params.as_slice())?)
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    let status_raw: i64 = row.get(4)?;
    let status = Status::from_sql(status_raw)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(4, status_raw))?;
    Ok(Task {
        description: row.get(0)?,
        category: row.get(1)?,
        created_at: row.get(2)?,
        completed_at: row.get(3)?,
        status,
        position: row.get(5)?,
    })
}
