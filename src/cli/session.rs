//! tl login/logout/status command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{load_warning, open_store};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::Action;
use crate::validate::{validate_login_form, LoginForm};

pub struct LoginOptions {
    pub username: String,
    pub password: String,
    pub store: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct LogoutOptions {
    pub store: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct StatusOptions {
    pub store: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct SessionOutput {
    logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

#[derive(Serialize)]
struct StatusOutput {
    store_dir: String,
    tasks: usize,
    logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

pub fn run_login(options: LoginOptions) -> Result<()> {
    let mut store = open_store(options.store, options.config)?;

    let form = LoginForm {
        username: options.username,
        password: options.password,
    };
    let errors = validate_login_form(&form);
    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    // The password was only ever needed for the shape check; it is dropped
    // here and never written anywhere.
    let username = form.username.trim().to_string();

    store.apply(Action::ToggleLoginModal)?;
    store.apply(Action::Login {
        username: username.clone(),
    })?;

    let output = SessionOutput {
        logged_in: true,
        username: Some(username.clone()),
    };

    let mut human = HumanOutput::new("Logged in");
    human.push_summary("Username", username);
    human.push_warning("login is a stub: credentials are not verified");

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "login",
        &output,
        Some(&human),
    )
}

pub fn run_logout(options: LogoutOptions) -> Result<()> {
    let mut store = open_store(options.store, options.config)?;
    let username = store.state().session.username.clone();
    store.apply(Action::Logout)?;

    let output = SessionOutput {
        logged_in: false,
        username: None,
    };

    let mut human = HumanOutput::new("Logged out");
    if let Some(username) = username {
        human.push_summary("Username", username);
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "logout",
        &output,
        Some(&human),
    )
}

pub fn run_status(options: StatusOptions) -> Result<()> {
    let store = open_store(options.store, options.config)?;
    let state = store.state();

    let output = StatusOutput {
        store_dir: store.storage().root().display().to_string(),
        tasks: state.tasks.len(),
        logged_in: state.session.logged_in,
        username: state.session.username.clone(),
    };

    let mut human = HumanOutput::new("tl status");
    human.push_summary("Store", output.store_dir.clone());
    human.push_summary("Tasks", output.tasks.to_string());
    human.push_summary(
        "Session",
        match &output.username {
            Some(username) if output.logged_in => format!("logged in as {username}"),
            _ => "logged out".to_string(),
        },
    );
    if let Some(warning) = load_warning(&store) {
        human.push_warning(warning);
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "status",
        &output,
        Some(&human),
    )
}
