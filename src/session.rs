//! Mock session state.
//!
//! The login flow is a stub: any login form that passes shape validation
//! authenticates, no credentials are checked against anything, and the
//! password is dropped immediately after validation. The session only
//! exists to gate edit/delete commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted session flag with the username that logged in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn logged_in(username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            logged_in: true,
            username: Some(username.into()),
            logged_in_at: Some(now),
        }
    }
}
