//! # Domain Model: the Todo
//!
//! A [`Todo`] is a description, a done flag and two timestamps, identified by a
//! small positive integer that the repository hands out.
//!
//! ## Identity
//!
//! `id == 0` means "not persisted yet": the repository allocates the next free
//! number when such a todo is saved. IDs are dense and 1-based, and they are
//! rewritten after deletions (see [`crate::store`]), so an ID is only meaningful
//! against the collection it was read from.
//!
//! ## Descriptions
//!
//! Descriptions are trimmed before they are stored. After trimming they must be
//! non-empty and at most [`MAX_DESCRIPTION_CHARS`] characters (Unicode scalar
//! values, not bytes). The same policy applies on construction and on edit.
//!
//! ## Timestamps
//!
//! The on-disk format keeps RFC 3339 timestamps with second precision, so every
//! timestamp is truncated to whole seconds as soon as it is assigned. A todo in
//! memory therefore always equals the todo read back from disk.
//!
//! `updated_at` is refreshed on every mutation and never moves before
//! `created_at`, even if the clock does.
//!
//! ## Serialized Form
//!
//! ```text
//! {
//!   "id": 1,
//!   "description": "Buy groceries",
//!   "done": false,
//!   "created_at": "2024-05-01T10:00:00Z",
//!   "updated_at": "2024-05-01T10:00:00Z"
//! }
//! ```
//!
//! Deserialization rejects unknown keys and finishes with [`Todo::validate`],
//! so a hand-edited file with a broken record fails to load instead of
//! silently carrying bad data.

use crate::error::{GctError, Result, EMPTY_DESCRIPTION};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_DESCRIPTION_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoRecord")]
pub struct Todo {
    pub id: u64,
    pub description: String,
    pub done: bool,
    #[serde(with = "rfc3339_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "rfc3339_seconds")]
    pub updated_at: DateTime<Utc>,
}

// Wire shape used while decoding, converted (and validated) into a `Todo`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TodoRecord {
    id: u64,
    description: String,
    done: bool,
    #[serde(with = "rfc3339_seconds")]
    created_at: DateTime<Utc>,
    #[serde(with = "rfc3339_seconds")]
    updated_at: DateTime<Utc>,
}

impl TryFrom<TodoRecord> for Todo {
    type Error = GctError;

    fn try_from(record: TodoRecord) -> Result<Self> {
        let todo = Todo {
            id: record.id,
            description: record.description,
            done: record.done,
            created_at: record.created_at,
            updated_at: record.updated_at,
        };
        todo.validate()?;
        Ok(todo)
    }
}

impl Todo {
    /// Build an unsaved todo (`id == 0`) stamped with `now`.
    pub fn new(description: impl AsRef<str>, now: DateTime<Utc>) -> Result<Self> {
        let description = validate_description(description.as_ref())?;
        let now = stamp(now);
        Ok(Self {
            id: 0,
            description,
            done: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.done = !self.done;
        self.touch(now);
    }

    pub fn update_description(&mut self, description: &str, now: DateTime<Utc>) -> Result<()> {
        self.description = validate_description(description)?;
        self.touch(now);
        Ok(())
    }

    /// Check every invariant a persisted todo must hold.
    pub fn validate(&self) -> Result<()> {
        if self.id == 0 {
            return Err(GctError::invalid_input("todo ID must be positive"));
        }
        validate_description(&self.description)?;
        if self.created_at.timestamp() <= 0 {
            return Err(GctError::invalid_input("created_at must be after the Unix epoch"));
        }
        if self.updated_at.timestamp() <= 0 {
            return Err(GctError::invalid_input("updated_at must be after the Unix epoch"));
        }
        if self.updated_at < self.created_at {
            return Err(GctError::invalid_input(
                "updated_at cannot be earlier than created_at",
            ));
        }
        Ok(())
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = stamp(now).max(self.created_at);
    }
}

/// Trim `raw` and check it against the description rules.
///
/// Returns the trimmed description on success.
pub fn validate_description(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EMPTY_DESCRIPTION);
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(GctError::invalid_input(format!(
            "description cannot exceed {} characters",
            MAX_DESCRIPTION_CHARS
        )));
    }
    Ok(trimmed.to_string())
}

fn stamp(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(0)
}

mod rfc3339_seconds {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(0))
            .map_err(serde::de::Error::custom)
    }
}
