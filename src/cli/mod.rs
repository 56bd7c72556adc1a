//! Command-line interface for tl
//!
//! This module defines the CLI structure using clap derive macros. The CLI
//! is the thin view/controller: it collects form values, runs validation,
//! and dispatches actions to the task store.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

mod session;
mod task;

/// tl - a local task list with a session-gated edit flow
///
/// Tasks live in a local data directory. Anyone can add and view tasks;
/// editing and deleting require a (mock) login session.
#[derive(Parser, Debug)]
#[command(name = "tl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data directory for tasks and session state
    #[arg(long, global = true, env = "TL_STORE")]
    pub store: Option<PathBuf>,

    /// Path to a config file (defaults to ./tl.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task title
        #[arg(long)]
        title: String,

        /// Task description (10 to 100 characters)
        #[arg(short = 'd', long)]
        description: String,
    },

    /// List all tasks
    List,

    /// Show one task
    Show {
        /// Task id (full or unique prefix)
        id: String,
    },

    /// Edit a task's title or description (requires login)
    Edit {
        /// Task id (full or unique prefix)
        id: String,

        /// New title (keeps the current one when omitted)
        #[arg(long)]
        title: Option<String>,

        /// New description (keeps the current one when omitted)
        #[arg(short = 'd', long)]
        description: Option<String>,
    },

    /// Delete a task (requires login)
    Delete {
        /// Task id (full or unique prefix)
        id: String,
    },

    /// Log in. The session is a stub: credentials are shape-checked only
    Login {
        /// Username (3 to 20 characters)
        #[arg(short = 'u', long)]
        username: String,

        /// Password (8+ characters with a digit and a special character)
        #[arg(short = 'p', long)]
        password: String,
    },

    /// Log out
    Logout,

    /// Show store location, task count, and session state
    Status,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let Cli {
            store,
            config,
            json,
            quiet,
            command,
        } = self;

        match command {
            Commands::Add { title, description } => task::run_add(task::AddOptions {
                title,
                description,
                store,
                config,
                json,
                quiet,
            }),
            Commands::List => task::run_list(task::ListOptions {
                store,
                config,
                json,
                quiet,
            }),
            Commands::Show { id } => task::run_show(task::ShowOptions {
                id,
                store,
                config,
                json,
                quiet,
            }),
            Commands::Edit {
                id,
                title,
                description,
            } => task::run_edit(task::EditOptions {
                id,
                title,
                description,
                store,
                config,
                json,
                quiet,
            }),
            Commands::Delete { id } => task::run_delete(task::DeleteOptions {
                id,
                store,
                config,
                json,
                quiet,
            }),
            Commands::Login { username, password } => session::run_login(session::LoginOptions {
                username,
                password,
                store,
                config,
                json,
                quiet,
            }),
            Commands::Logout => session::run_logout(session::LogoutOptions {
                store,
                config,
                json,
                quiet,
            }),
            Commands::Status => session::run_status(session::StatusOptions {
                store,
                config,
                json,
                quiet,
            }),
        }
    }
}

/// Shared command setup: load config, resolve the data directory, and
/// open the task store.
pub(crate) fn open_store(
    store: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<crate::store::TaskStore> {
    let config = crate::config::Config::load(config.as_deref())?;
    let storage = crate::storage::Storage::resolve(store, &config)?;
    storage.init()?;
    Ok(crate::store::TaskStore::open(storage))
}

/// Warning line when the stored task list had to be reset at load time.
pub(crate) fn load_warning(store: &crate::store::TaskStore) -> Option<String> {
    match store.tasks_source() {
        crate::storage::LoadSource::Corrupt => {
            Some("stored task list was unreadable and was reset to empty".to_string())
        }
        _ => None,
    }
}
