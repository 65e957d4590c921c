//! Task repository: mutation policy and position reindexing.
//!
//! Every mutation leaves the set of stored positions exactly
//! `{0, ..., count-1}`: unique, zero-based, gap-free. Reindexing shifts rows
//! one slot at a time in strictly increasing position order, so each target
//! slot has already been vacated by the previous step and no two rows ever
//! share a position at a commit point. All multi-row sequences run inside a
//! single transaction.

use chrono::Utc;
use tracing::debug;

use crate::error::Result;
use crate::store::TaskStore;
use crate::task::{Status, Task, TaskPatch, ARCHIVE_CATEGORY};

/// Result of a position-addressed mutation.
///
/// An out-of-range position is an informational outcome, not an error: the
/// store is left untouched and the CLI reports it as a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation was applied.
    Applied,
    /// No task exists at the addressed position; nothing changed.
    NoSuchPosition { position: i64 },
}

impl Outcome {
    #[must_use]
    pub fn applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Owns the store and enforces the position-contiguity invariant.
pub struct TaskRepository {
    store: TaskStore,
}

impl TaskRepository {
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    /// Append a new task at the end of the ordering.
    ///
    /// The position is read and the row written in one transaction, so the
    /// resulting position set is `[0, N]` contiguous.
    pub fn insert(&mut self, description: &str, category: &str) -> Result<Task> {
        let mut task = Task::new(description, category);
        let tx = self.store.transaction()?;
        task.position = tx.count()?;
        tx.insert(&task)?;
        tx.commit()?;
        debug!(position = task.position, "task inserted");
        Ok(task)
    }

    /// Delete the task at `position` and close the gap.
    ///
    /// Rows above the deleted slot shift down by one, lowest first.
    /// Postcondition: positions are contiguous `[0, N-2]`.
    pub fn delete_at(&mut self, position: i64) -> Result<Outcome> {
        let tx = self.store.transaction()?;
        let count = tx.count()?;
        if position < 0 || position >= count {
            return Ok(Outcome::NoSuchPosition { position });
        }

        tx.delete(position)?;
        for pos in position + 1..count {
            tx.set_position(pos, pos - 1)?;
        }
        tx.commit()?;
        debug!(position, remaining = count - 1, "task deleted");
        Ok(Outcome::Applied)
    }

    /// Relocate the task at `position` to the end of the ordering.
    ///
    /// Two-phase shift: the row first moves to the temporary slot `N`
    /// (beyond the current maximum), then every row above the vacated slot
    /// shifts down by one in increasing order. The final shift lands the
    /// moved row at `N-1`; the relative order of all other rows is
    /// preserved.
    pub fn move_to_end(&mut self, position: i64) -> Result<Outcome> {
        let tx = self.store.transaction()?;
        let count = tx.count()?;
        if position < 0 || position >= count {
            return Ok(Outcome::NoSuchPosition { position });
        }

        tx.set_position(position, count)?;
        for pos in position + 1..=count {
            tx.set_position(pos, pos - 1)?;
        }
        tx.commit()?;
        debug!(position, end = count - 1, "task moved to end");
        Ok(Outcome::Applied)
    }

    /// Update a subset of mutable fields in place.
    ///
    /// Never touches position or count. A supplied category is uppercased;
    /// an empty patch applies trivially once the position is known to exist.
    pub fn update_at(&mut self, position: i64, mut patch: TaskPatch) -> Result<Outcome> {
        if position < 0 || position >= self.store.count()? {
            return Ok(Outcome::NoSuchPosition { position });
        }
        if patch.is_empty() {
            return Ok(Outcome::Applied);
        }
        if let Some(category) = patch.category.take() {
            patch.category = Some(category.to_uppercase());
        }

        let affected = self.store.update_fields(position, &patch)?;
        if affected == 0 {
            return Ok(Outcome::NoSuchPosition { position });
        }
        Ok(Outcome::Applied)
    }

    /// Mark the task at `position` completed, stamping the completion time.
    pub fn complete_at(&mut self, position: i64) -> Result<Outcome> {
        let patch = TaskPatch::default()
            .with_status(Status::Completed)
            .with_completed_at(Some(Utc::now()));
        self.update_at(position, patch)
    }

    /// Mark the task at `position` as in progress.
    pub fn start_at(&mut self, position: i64) -> Result<Outcome> {
        self.update_at(position, TaskPatch::default().with_status(Status::InProgress))
    }

    /// Archive the task at `position`: terminal status, ARCHIVE category,
    /// relocated to the end of the ordering.
    ///
    /// Any prior status may be archived; transitions are deliberately
    /// unvalidated.
    pub fn archive_at(&mut self, position: i64) -> Result<Outcome> {
        let patch = TaskPatch::default()
            .with_status(Status::Archived)
            .with_category(ARCHIVE_CATEGORY);
        let outcome = self.update_at(position, patch)?;
        if !outcome.applied() {
            return Ok(outcome);
        }
        self.move_to_end(position)
    }

    /// Delete every task. No reindexing is needed: empty is trivially
    /// contiguous.
    pub fn wipe(&mut self) -> Result<()> {
        self.store.delete_all()
    }

    /// All tasks in position order.
    pub fn tasks(&self) -> Result<Vec<Task>> {
        self.store.select_all(None)
    }

    /// Number of stored tasks.
    pub fn count(&self) -> Result<i64> {
        self.store.count()
    }
}
