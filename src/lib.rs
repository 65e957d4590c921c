//! tasktrack - personal task tracking from the command line.
//!
//! Tasks are kept in a local SQLite database as an ordered list addressed
//! by position: a zero-based, gap-free rank that stays contiguous across
//! inserts, deletes, and archive-to-end reordering.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`store`] - SQLite storage backend (schema, row and transaction primitives)
//! - [`repo`] - Task repository: reindexing algorithm and mutation policy
//! - [`task`] - The task entity, status enum, and text normalization
//! - [`config`] - Data-dir resolution and optional TOML configuration
//! - [`display`] - Table rendering for listings
//! - [`error`] - Custom error types and handling
//!
//! # Example
//!
//! ```rust,ignore
//! use tasktrack::{TaskRepository, TaskStore};
//!
//! let store = TaskStore::open(&tasktrack::config::default_db_path()?)?;
//! let mut repo = TaskRepository::new(store);
//!
//! repo.insert("buy milk", "groceries")?;
//! repo.complete_at(0)?;
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod repo;
pub mod store;
pub mod task;

// Re-export commonly used types
pub use config::Config;
pub use display::ShowFilter;
pub use error::{Result, TrackerError};
pub use repo::{Outcome, TaskRepository};
pub use store::TaskStore;
pub use task::{Status, Task, TaskPatch, ARCHIVE_CATEGORY, DEFAULT_CATEGORY};
