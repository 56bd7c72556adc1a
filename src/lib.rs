//! tl - local task list library
//!
//! This library backs the `tl` CLI: a single-user task list where edits and
//! deletions are gated behind a mock login session.
//!
//! # Core Concepts
//!
//! - **Task Store**: a pure reducer over `{tasks, modal, session}` wrapped by
//!   a state-owning service that persists task and session changes
//! - **Validation**: declarative field rules for the task and login forms
//! - **Session**: the stub login flag; any well-formed login authenticates
//! - **Storage**: keyed JSON documents in a local data directory
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `tl.toml`
//! - `error`: error types and result aliases
//! - `output`: human and JSON output envelopes
//! - `session`: mock session state
//! - `storage`: data directory and atomic JSON documents
//! - `store`: the reducer and the `TaskStore` service
//! - `task`: task records and id handling
//! - `validate`: form validation rules

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod storage;
pub mod store;
pub mod task;
pub mod validate;

pub use error::{Error, Result};
