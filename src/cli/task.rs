//! tl task command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{load_warning, open_store};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::{Action, Outcome, TaskStore};
use crate::task::TaskRecord;
use crate::validate::{validate_task_form, TaskForm};

pub struct AddOptions {
    pub title: String,
    pub description: String,
    pub store: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub store: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub id: String,
    pub store: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub store: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DeleteOptions {
    pub id: String,
    pub store: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct TaskCreatedOutput {
    id: String,
    title: String,
}

#[derive(Serialize)]
struct TaskListOutput {
    count: usize,
    tasks: Vec<TaskRecord>,
}

#[derive(Serialize)]
struct TaskDeletedOutput {
    id: String,
    title: String,
    remaining: usize,
}

fn require_login(store: &TaskStore, verb: &str) -> Result<()> {
    if store.state().session.logged_in {
        Ok(())
    } else {
        Err(Error::LoginRequired(format!("{verb} tasks")))
    }
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut store = open_store(options.store, options.config)?;

    let form = TaskForm {
        title: options.title,
        description: options.description,
    };
    let errors = validate_task_form(&form);
    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    store.apply(Action::ToggleAddModal)?;
    let outcome = store.apply(Action::AddTask {
        title: form.title,
        description: form.description,
    })?;
    if let Outcome::Ignored(reason) = outcome {
        return Err(reason.into_error());
    }

    let task = store
        .state()
        .tasks
        .last()
        .cloned()
        .ok_or_else(|| Error::OperationFailed("task was not recorded".to_string()))?;

    let output = TaskCreatedOutput {
        id: task.id.clone(),
        title: task.title.clone(),
    };

    let mut human = HumanOutput::new("Task created");
    if let Some(warning) = load_warning(&store) {
        human.push_warning(warning);
    }
    human.push_summary("ID", task.id);
    human.push_summary("Title", task.title);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &output,
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let store = open_store(options.store, options.config)?;
    let tasks = store.state().tasks.clone();

    let output = TaskListOutput {
        count: tasks.len(),
        tasks: tasks.clone(),
    };

    let mut human = if tasks.is_empty() {
        HumanOutput::new("You have no tasks. Add new.")
    } else {
        let mut human = HumanOutput::new(format!(
            "{} task{}",
            tasks.len(),
            if tasks.len() == 1 { "" } else { "s" }
        ));
        for task in &tasks {
            human.push_detail(format!("{}  {}", task.id, task.title));
        }
        human
    };
    if let Some(warning) = load_warning(&store) {
        human.push_warning(warning);
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &output,
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let mut store = open_store(options.store, options.config)?;
    let resolved = store.resolve_id(&options.id)?;

    store.apply(Action::ViewTask {
        id: resolved.clone(),
    })?;

    let task = store
        .find(&resolved)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(resolved))?;

    let mut human = HumanOutput::new("Task");
    human.push_summary("ID", task.id.clone());
    human.push_summary("Title", task.title.clone());
    human.push_summary("Description", task.description.clone());
    human.push_summary("Created", task.created_at.to_rfc3339());
    human.push_summary("Updated", task.updated_at.to_rfc3339());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "show",
        &task,
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let mut store = open_store(options.store, options.config)?;
    require_login(&store, "edit")?;

    let resolved = store.resolve_id(&options.id)?;
    let current = store
        .find(&resolved)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(resolved.clone()))?;

    // Omitted flags keep the current value; the kept value still has to
    // satisfy the task form rules.
    let form = TaskForm {
        title: options.title.unwrap_or(current.title),
        description: options.description.unwrap_or(current.description),
    };
    let errors = validate_task_form(&form);
    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    store.apply(Action::EditTask {
        id: resolved.clone(),
    })?;
    let outcome = store.apply(Action::UpdateTask {
        id: resolved.clone(),
        title: form.title.clone(),
        description: form.description,
    })?;
    if let Outcome::Ignored(reason) = outcome {
        return Err(reason.into_error());
    }

    let output = TaskCreatedOutput {
        id: resolved.clone(),
        title: form.title.clone(),
    };

    let mut human = HumanOutput::new("Task updated");
    human.push_summary("ID", resolved);
    human.push_summary("Title", form.title);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "edit",
        &output,
        Some(&human),
    )
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let mut store = open_store(options.store, options.config)?;
    require_login(&store, "delete")?;

    let resolved = store.resolve_id(&options.id)?;
    let title = store
        .find(&resolved)
        .map(|task| task.title.clone())
        .unwrap_or_default();

    let outcome = store.apply(Action::DeleteTask {
        id: resolved.clone(),
    })?;
    if let Outcome::Ignored(reason) = outcome {
        return Err(reason.into_error());
    }

    let output = TaskDeletedOutput {
        id: resolved.clone(),
        title: title.clone(),
        remaining: store.state().tasks.len(),
    };

    let mut human = HumanOutput::new("Task deleted");
    human.push_summary("ID", resolved);
    human.push_summary("Title", title);
    human.push_summary("Remaining", output.remaining.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "delete",
        &output,
        Some(&human),
    )
}
