//! Task records and id handling.
//!
//! Tasks carry a stable id of the form `t-<suffix>` assigned at creation.
//! The suffix is drawn from the random part of a ULID, so ids stay valid
//! across deletions and reorderings (nothing addresses a task by position).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::{Error, Result};

/// Prefix for generated task ids.
pub const ID_PREFIX: &str = "t";

const ULID_TIME_LEN: usize = 10;
const SUFFIX_LEN: usize = 6;

/// A single task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Generate an id not used by any record in `existing`.
pub fn generate_id(existing: &[TaskRecord]) -> String {
    let taken: HashSet<&str> = existing.iter().map(|task| task.id.as_str()).collect();
    loop {
        let base = Ulid::new().to_string().to_lowercase();
        let suffix = &base[ULID_TIME_LEN..ULID_TIME_LEN + SUFFIX_LEN];
        let candidate = format!("{ID_PREFIX}-{suffix}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
    }
}

/// Resolve user input to a full task id.
///
/// Accepts the full id or a unique prefix of it, with or without the
/// `t-` prefix, case-insensitively.
pub fn resolve_id(tasks: &[TaskRecord], input: &str) -> Result<String> {
    let trimmed = input.trim().to_ascii_lowercase();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument("task id cannot be empty".to_string()));
    }

    let prefix = format!("{ID_PREFIX}-");
    let bare = trimmed
        .strip_prefix(prefix.as_str())
        .unwrap_or(&trimmed)
        .to_string();

    let mut matches: Vec<String> = Vec::new();
    for task in tasks {
        let id = task.id.to_ascii_lowercase();
        if id == trimmed {
            return Ok(task.id.clone());
        }
        let suffix = id.strip_prefix(prefix.as_str()).unwrap_or(&id);
        if id.starts_with(&trimmed) || suffix.starts_with(&bare) {
            matches.push(task.id.clone());
        }
    }

    matches.sort();
    matches.dedup();
    match matches.len() {
        0 => Err(Error::TaskNotFound(input.trim().to_string())),
        1 => Ok(matches.remove(0)),
        _ => Err(Error::AmbiguousTaskId {
            input: input.trim().to_string(),
            matches: matches.join(", "),
        }),
    }
}
