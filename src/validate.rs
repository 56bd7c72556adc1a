//! Form validation rules for the task and login forms.
//!
//! Each rule set is a pure function over the submitted field values that
//! returns at most one message per field (first failing rule wins). Callers
//! dispatch a store action only when the returned list is empty.

use serde::Serialize;

/// Minimum trimmed description length for a task.
pub const DESCRIPTION_MIN: usize = 10;
/// Maximum trimmed description length for a task.
pub const DESCRIPTION_MAX: usize = 100;
/// Minimum trimmed username length.
pub const USERNAME_MIN: usize = 3;
/// Maximum trimmed username length.
pub const USERNAME_MAX: usize = 20;
/// Minimum password length.
pub const PASSWORD_MIN: usize = 8;
/// Characters accepted as the required password special character.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*";

/// A single failed field with its user-facing message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Field values submitted for task creation or edit.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
}

/// Field values submitted for login.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Validate a task form: title required, description required with a
/// trimmed length in `[DESCRIPTION_MIN, DESCRIPTION_MAX]`.
pub fn validate_task_form(form: &TaskForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    }

    let description = form.description.trim();
    if description.is_empty() {
        errors.push(FieldError::new("description", "Description is required"));
    } else if description.chars().count() < DESCRIPTION_MIN {
        errors.push(FieldError::new(
            "description",
            format!("Description must be at least {DESCRIPTION_MIN} characters"),
        ));
    } else if description.chars().count() > DESCRIPTION_MAX {
        errors.push(FieldError::new(
            "description",
            format!("Description must be at most {DESCRIPTION_MAX} characters"),
        ));
    }

    errors
}

/// Validate a login form: username required with a trimmed length in
/// `[USERNAME_MIN, USERNAME_MAX]`; password required and matching the
/// composite shape rule (length, digit, special character).
pub fn validate_login_form(form: &LoginForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let username = form.username.trim();
    if username.is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    } else if username.chars().count() < USERNAME_MIN {
        errors.push(FieldError::new(
            "username",
            format!("Username must be at least {USERNAME_MIN} characters"),
        ));
    } else if username.chars().count() > USERNAME_MAX {
        errors.push(FieldError::new(
            "username",
            format!("Username must be at most {USERNAME_MAX} characters"),
        ));
    }

    // The password rule applies to the raw value; passwords are never trimmed.
    if form.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if !password_shape_ok(&form.password) {
        errors.push(FieldError::new(
            "password",
            format!(
                "Password must contain at least {PASSWORD_MIN} characters, \
                 1 special character, and 1 numeric digit"
            ),
        ));
    }

    errors
}

fn password_shape_ok(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}
