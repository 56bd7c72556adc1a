//! The task store: a pure reducer over application state, wrapped by the
//! state-owning [`TaskStore`] service.
//!
//! [`transition`] is the only place task data changes. It takes the current
//! state and an [`Action`] and returns the next state plus an [`Outcome`];
//! it never mutates its input and performs no I/O. [`TaskStore::apply`]
//! runs the transition, persists the affected documents, and installs the
//! new state.
//!
//! Every transition is total: actions that cannot apply (unknown task id,
//! blank fields) return [`Outcome::Ignored`] with the state unchanged
//! rather than failing.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::session::Session;
use crate::storage::{LoadSource, Storage};
use crate::task::{self, TaskRecord};

/// Which modal, if any, is open. At most one at a time; opening one
/// closes any other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    None,
    AddingTask,
    LoggingIn,
    Viewing(String),
    Editing(String),
}

/// Full application state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Tasks in insertion order
    pub tasks: Vec<TaskRecord>,
    /// Open modal; in-memory only, never persisted
    pub modal: ModalState,
    /// Mock login session
    pub session: Session,
}

/// Named state transitions.
#[derive(Debug, Clone)]
pub enum Action {
    /// Append a new task and close the add modal
    AddTask { title: String, description: String },
    /// Remove the task with the given id
    DeleteTask { id: String },
    /// Replace title/description of the task with the given id
    UpdateTask {
        id: String,
        title: String,
        description: String,
    },
    /// Open or close the add-task modal
    ToggleAddModal,
    /// Open or close the login modal
    ToggleLoginModal,
    /// Open the view modal for a task
    ViewTask { id: String },
    /// Open the edit modal for a task
    EditTask { id: String },
    /// Close whatever modal is open
    CloseModal,
    /// Mark the session logged in and close the login modal
    Login { username: String },
    /// Mark the session logged out; modal state is untouched
    Logout,
}

impl Action {
    fn touches_tasks(&self) -> bool {
        matches!(
            self,
            Action::AddTask { .. } | Action::DeleteTask { .. } | Action::UpdateTask { .. }
        )
    }

    fn touches_session(&self) -> bool {
        matches!(self, Action::Login { .. } | Action::Logout)
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddTask { .. } => "add_task",
            Action::DeleteTask { .. } => "delete_task",
            Action::UpdateTask { .. } => "update_task",
            Action::ToggleAddModal => "toggle_add_modal",
            Action::ToggleLoginModal => "toggle_login_modal",
            Action::ViewTask { .. } => "view_task",
            Action::EditTask { .. } => "edit_task",
            Action::CloseModal => "close_modal",
            Action::Login { .. } => "login",
            Action::Logout => "logout",
        }
    }
}

/// Why a transition was a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No task with this id exists
    UnknownTask(String),
    /// Title or description was empty after trimming
    BlankFields,
}

impl IgnoreReason {
    /// Convert into the error the CLI reports when an ignored transition
    /// means the user's request could not be honored.
    pub fn into_error(self) -> Error {
        match self {
            IgnoreReason::UnknownTask(id) => Error::TaskNotFound(id),
            IgnoreReason::BlankFields => {
                Error::InvalidArgument("Title and description are required".to_string())
            }
        }
    }
}

/// Result of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Pure state transition. Returns the next state and whether the action
/// applied; the input state is never mutated and no I/O happens here.
pub fn transition(state: &AppState, action: &Action, now: DateTime<Utc>) -> (AppState, Outcome) {
    let mut next = state.clone();
    let outcome = match action {
        Action::AddTask { title, description } => {
            let title = title.trim();
            let description = description.trim();
            if title.is_empty() || description.is_empty() {
                Outcome::Ignored(IgnoreReason::BlankFields)
            } else {
                let id = task::generate_id(&next.tasks);
                next.tasks.push(TaskRecord::new(id, title, description, now));
                next.modal = ModalState::None;
                Outcome::Applied
            }
        }
        Action::DeleteTask { id } => {
            let before = next.tasks.len();
            next.tasks.retain(|task| task.id != *id);
            if next.tasks.len() == before {
                Outcome::Ignored(IgnoreReason::UnknownTask(id.clone()))
            } else {
                Outcome::Applied
            }
        }
        Action::UpdateTask {
            id,
            title,
            description,
        } => {
            let title = title.trim();
            let description = description.trim();
            if title.is_empty() || description.is_empty() {
                Outcome::Ignored(IgnoreReason::BlankFields)
            } else {
                match next.tasks.iter_mut().find(|task| task.id == *id) {
                    Some(task) => {
                        task.title = title.to_string();
                        task.description = description.to_string();
                        task.updated_at = now;
                        Outcome::Applied
                    }
                    None => Outcome::Ignored(IgnoreReason::UnknownTask(id.clone())),
                }
            }
        }
        Action::ToggleAddModal => {
            next.modal = if next.modal == ModalState::AddingTask {
                ModalState::None
            } else {
                ModalState::AddingTask
            };
            Outcome::Applied
        }
        Action::ToggleLoginModal => {
            next.modal = if next.modal == ModalState::LoggingIn {
                ModalState::None
            } else {
                ModalState::LoggingIn
            };
            Outcome::Applied
        }
        Action::ViewTask { id } => {
            if next.tasks.iter().any(|task| task.id == *id) {
                next.modal = ModalState::Viewing(id.clone());
                Outcome::Applied
            } else {
                Outcome::Ignored(IgnoreReason::UnknownTask(id.clone()))
            }
        }
        Action::EditTask { id } => {
            if next.tasks.iter().any(|task| task.id == *id) {
                next.modal = ModalState::Editing(id.clone());
                Outcome::Applied
            } else {
                Outcome::Ignored(IgnoreReason::UnknownTask(id.clone()))
            }
        }
        Action::CloseModal => {
            next.modal = ModalState::None;
            Outcome::Applied
        }
        Action::Login { username } => {
            next.session = Session::logged_in(username.clone(), now);
            next.modal = ModalState::None;
            Outcome::Applied
        }
        Action::Logout => {
            next.session = Session::logged_out();
            Outcome::Applied
        }
    };
    (next, outcome)
}

/// State-owning service: loads state once, applies actions, and mirrors
/// task/session changes into storage.
#[derive(Debug)]
pub struct TaskStore {
    storage: Storage,
    state: AppState,
    tasks_source: LoadSource,
}

impl TaskStore {
    /// Load state from storage. Missing or corrupt documents yield the
    /// empty defaults; `tasks_source` records which case occurred.
    pub fn open(storage: Storage) -> Self {
        let load = storage.load_tasks();
        let session = storage.load_session();
        let state = AppState {
            tasks: load.tasks,
            modal: ModalState::None,
            session,
        };
        Self {
            storage,
            state,
            tasks_source: load.source,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Where the task list came from at open time.
    pub fn tasks_source(&self) -> LoadSource {
        self.tasks_source
    }

    pub fn find(&self, id: &str) -> Option<&TaskRecord> {
        self.state.tasks.iter().find(|task| task.id == id)
    }

    /// Resolve user input (full id or unique prefix) to a task id.
    pub fn resolve_id(&self, input: &str) -> Result<String> {
        task::resolve_id(&self.state.tasks, input)
    }

    /// Apply an action: run the pure transition, persist the affected
    /// documents, then install the new state. On a persistence failure the
    /// in-memory state is left unchanged so memory and disk stay in step.
    pub fn apply(&mut self, action: Action) -> Result<Outcome> {
        let now = Utc::now();
        let (next, outcome) = transition(&self.state, &action, now);
        if outcome.applied() {
            if action.touches_tasks() {
                self.storage.save_tasks(&next.tasks)?;
            }
            if action.touches_session() {
                self.storage.save_session(&next.session)?;
            }
        }
        debug!(
            action = action.name(),
            applied = outcome.applied(),
            tasks = next.tasks.len(),
            "store transition"
        );
        self.state = next;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn add(state: &AppState, title: &str, description: &str) -> (AppState, Outcome) {
        transition(
            state,
            &Action::AddTask {
                title: title.to_string(),
                description: description.to_string(),
            },
            now(),
        )
    }

    #[test]
    fn add_appends_in_call_order() {
        let mut state = AppState::default();
        for i in 0..5 {
            let (next, outcome) = add(&state, &format!("task {i}"), "a long enough description");
            assert_eq!(outcome, Outcome::Applied);
            state = next;
        }
        assert_eq!(state.tasks.len(), 5);
        let titles: Vec<_> = state.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["task 0", "task 1", "task 2", "task 3", "task 4"]);
    }

    #[test]
    fn add_closes_the_add_modal() {
        let state = AppState {
            modal: ModalState::AddingTask,
            ..AppState::default()
        };
        let (next, _) = add(&state, "title", "a long enough description");
        assert_eq!(next.modal, ModalState::None);
    }

    #[test]
    fn add_with_blank_fields_is_ignored() {
        let state = AppState::default();
        let (next, outcome) = add(&state, "   ", "a long enough description");
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::BlankFields));
        assert_eq!(next, state);
    }

    #[test]
    fn transition_never_mutates_its_input() {
        let (with_one, _) = add(&AppState::default(), "keep", "a long enough description");
        let snapshot = with_one.clone();
        let id = with_one.tasks[0].id.clone();
        let _ = transition(&with_one, &Action::DeleteTask { id }, now());
        assert_eq!(with_one, snapshot);
    }

    #[test]
    fn delete_removes_exactly_the_addressed_task() {
        let (state, _) = add(&AppState::default(), "first", "a long enough description");
        let (state, _) = add(&state, "second", "a long enough description");
        let (state, _) = add(&state, "third", "a long enough description");
        let target = state.tasks[1].id.clone();

        let (next, outcome) = transition(&state, &Action::DeleteTask { id: target }, now());
        assert_eq!(outcome, Outcome::Applied);
        let titles: Vec<_> = next.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "third"]);
    }

    #[test]
    fn delete_unknown_id_is_an_explicit_no_op() {
        let (state, _) = add(&AppState::default(), "only", "a long enough description");
        let (next, outcome) = transition(
            &state,
            &Action::DeleteTask {
                id: "t-zzzzzz".to_string(),
            },
            now(),
        );
        assert_eq!(
            outcome,
            Outcome::Ignored(IgnoreReason::UnknownTask("t-zzzzzz".to_string()))
        );
        assert_eq!(next, state);
    }

    #[test]
    fn update_replaces_only_the_addressed_task() {
        let (state, _) = add(&AppState::default(), "first", "a long enough description");
        let (state, _) = add(&state, "second", "a long enough description");
        let target = state.tasks[0].id.clone();

        let (next, outcome) = transition(
            &state,
            &Action::UpdateTask {
                id: target.clone(),
                title: "renamed".to_string(),
                description: "a different long description".to_string(),
            },
            now(),
        );
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(next.tasks.len(), 2);
        assert_eq!(next.tasks[0].id, target);
        assert_eq!(next.tasks[0].title, "renamed");
        assert_eq!(next.tasks[0].description, "a different long description");
        assert_eq!(next.tasks[1], state.tasks[1]);
    }

    #[test]
    fn update_unknown_id_is_an_explicit_no_op() {
        let state = AppState::default();
        let (next, outcome) = transition(
            &state,
            &Action::UpdateTask {
                id: "t-zzzzzz".to_string(),
                title: "x".to_string(),
                description: "a long enough description".to_string(),
            },
            now(),
        );
        assert!(matches!(
            outcome,
            Outcome::Ignored(IgnoreReason::UnknownTask(_))
        ));
        assert_eq!(next, state);
    }

    #[test]
    fn modals_are_mutually_exclusive() {
        let state = AppState::default();
        let (state, _) = transition(&state, &Action::ToggleAddModal, now());
        assert_eq!(state.modal, ModalState::AddingTask);

        // Opening the login modal closes the add modal.
        let (state, _) = transition(&state, &Action::ToggleLoginModal, now());
        assert_eq!(state.modal, ModalState::LoggingIn);

        // Toggling again closes it.
        let (state, _) = transition(&state, &Action::ToggleLoginModal, now());
        assert_eq!(state.modal, ModalState::None);
    }

    #[test]
    fn view_and_edit_open_modals_for_known_tasks_only() {
        let (state, _) = add(&AppState::default(), "a task", "a long enough description");
        let id = state.tasks[0].id.clone();

        let (state, outcome) = transition(&state, &Action::ViewTask { id: id.clone() }, now());
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(state.modal, ModalState::Viewing(id.clone()));

        let (state, outcome) = transition(&state, &Action::EditTask { id: id.clone() }, now());
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(state.modal, ModalState::Editing(id));

        let (state, outcome) = transition(
            &state,
            &Action::ViewTask {
                id: "t-zzzzzz".to_string(),
            },
            now(),
        );
        assert!(matches!(outcome, Outcome::Ignored(_)));

        let (state, _) = transition(&state, &Action::CloseModal, now());
        assert_eq!(state.modal, ModalState::None);
    }

    #[test]
    fn login_always_logs_in_and_closes_the_modal() {
        let state = AppState {
            modal: ModalState::LoggingIn,
            ..AppState::default()
        };
        let (next, outcome) = transition(
            &state,
            &Action::Login {
                username: "casey".to_string(),
            },
            now(),
        );
        assert_eq!(outcome, Outcome::Applied);
        assert!(next.session.logged_in);
        assert_eq!(next.session.username.as_deref(), Some("casey"));
        assert_eq!(next.modal, ModalState::None);

        // Login is unconditional, also from an already-logged-in state.
        let (again, _) = transition(
            &next,
            &Action::Login {
                username: "riley".to_string(),
            },
            now(),
        );
        assert!(again.session.logged_in);
        assert_eq!(again.session.username.as_deref(), Some("riley"));
    }

    #[test]
    fn logout_clears_the_session_and_leaves_the_modal() {
        let state = AppState {
            modal: ModalState::AddingTask,
            session: Session::logged_in("casey", now()),
            ..AppState::default()
        };
        let (next, outcome) = transition(&state, &Action::Logout, now());
        assert_eq!(outcome, Outcome::Applied);
        assert!(!next.session.logged_in);
        assert!(next.session.username.is_none());
        assert_eq!(next.modal, ModalState::AddingTask);
    }

    #[test]
    fn spec_scenario_add_then_delete() {
        let state = AppState::default();
        let (state, _) = add(&state, "Buy milk", "Buy milk from the store today");
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].title, "Buy milk");
        assert_eq!(state.tasks[0].description, "Buy milk from the store today");
        assert_eq!(state.modal, ModalState::None);

        let id = state.tasks[0].id.clone();
        let (state, _) = transition(&state, &Action::DeleteTask { id }, now());
        assert!(state.tasks.is_empty());
    }
}
