//! The task entity and its text normalization rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category assigned when the user does not supply one.
pub const DEFAULT_CATEGORY: &str = "Unassigned";

/// Category assigned to archived tasks.
pub const ARCHIVE_CATEGORY: &str = "ARCHIVE";

/// Lifecycle state of a task.
///
/// Stored as a small integer; the numbering is part of the on-disk format
/// and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    ToDo,
    Completed,
    InProgress,
    Archived,
}

impl Status {
    /// Integer stored in the `status` column.
    #[must_use]
    pub fn as_sql(self) -> i64 {
        match self {
            Self::ToDo => 1,
            Self::Completed => 2,
            Self::InProgress => 3,
            Self::Archived => 4,
        }
    }

    /// Decode a stored status value. Unknown values are a storage error.
    #[must_use]
    pub fn from_sql(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::ToDo),
            2 => Some(Self::Completed),
            3 => Some(Self::InProgress),
            4 => Some(Self::Archived),
            _ => None,
        }
    }

    /// Human-readable label for table output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::Completed => "Done",
            Self::InProgress => "Progress",
            Self::Archived => "Archived",
        }
    }
}

/// A single tracked task.
///
/// `position` is the task's zero-based rank among all stored tasks and is
/// its addressable identity for mutation commands. The repository keeps
/// positions contiguous `[0, count-1]` between operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: Status,
    pub position: i64,
}

impl Task {
    /// Create a new task with normalized text, ready to be appended.
    ///
    /// The description is title-cased word by word (words already containing
    /// an uppercase letter are preserved verbatim) and the category is
    /// uppercased. Position is assigned by the repository at insert time.
    #[must_use]
    pub fn new(description: &str, category: &str) -> Self {
        Self {
            description: normalize_description(description),
            category: category.to_uppercase(),
            created_at: Utc::now(),
            completed_at: None,
            status: Status::ToDo,
            position: 0,
        }
    }
}

/// A partial update to a task's mutable fields.
///
/// Only the fields that are `Some` are written; position and creation time
/// are never touched. Values are always bound as statement parameters,
/// never interpolated into SQL text.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<Status>,
    /// `Some(None)` clears the completion timestamp.
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_completed_at(mut self, completed_at: Option<DateTime<Utc>>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// True when no field is set; applying an empty patch is a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.completed_at.is_none()
    }
}

/// Title-case each whitespace-separated word of a description.
///
/// A word that already contains an uppercase letter (acronyms, product
/// names) is preserved verbatim: `"call IBM rep"` becomes `"Call IBM Rep"`.
#[must_use]
pub fn normalize_description(raw: &str) -> String {
    raw.split_whitespace()
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_word(word: &str) -> String {
    if word.chars().any(char::is_uppercase) {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
