//! Client-side form state and field validation.
//!
//! Validation failures stay inside the form: they are reported per field and
//! never reach the task store. A field's error is cleared as soon as that
//! field is edited again.

use super::task::Task;
use regex::Regex;
use std::mem;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum password length enforced when creating an account.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),
    #[error("Task title is required")]
    TitleRequired,
    #[error("Invalid due date: '{0}' (expected YYYY-MM-DD)")]
    DueDateInvalid(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !looks_like_email(email) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

/// Sign-in accepts any non-empty password; sign-up also enforces [`MIN_PASSWORD_LEN`],
/// counted in UTF-16 code units.
pub fn validate_password(password: &str, mode: AuthMode) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if mode == AuthMode::SignUp && password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(())
}

/// Non-blank run, `@`, non-blank run, `.`, non-blank run; matched anywhere in the text.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid email regex pattern"));

fn looks_like_email(text: &str) -> bool {
    EMAIL_PATTERN.is_match(text)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<ValidationError>,
    pub password: Option<ValidationError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Sign-in / sign-up form.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    mode: AuthMode,
    email: String,
    password: String,
    errors: FieldErrors,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.to_string();
        self.errors.email = None;
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = password.to_string();
        self.errors.password = None;
    }

    /// Switches between sign-in and sign-up and forgets all field errors.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.errors = FieldErrors::default();
    }

    /// Recomputes the field errors; `true` when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors = FieldErrors {
            email: validate_email(&self.email).err(),
            password: validate_password(&self.password, self.mode).err(),
        };
        self.errors.is_empty()
    }
}

/// Values handed to the controller by the add and edit forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub due_date: String,
}

/// Add-task form. Submitting clears every field.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub due_date: String,
}

impl TaskForm {
    pub fn can_submit(&self) -> bool {
        validate_title(&self.title).is_ok()
    }

    /// Takes the input out of the form, or returns `None` and leaves the
    /// fields alone when the title is blank.
    pub fn submit(&mut self) -> Option<TaskInput> {
        if !self.can_submit() {
            return None;
        }
        Some(TaskInput {
            title: mem::take(&mut self.title),
            description: mem::take(&mut self.description),
            due_date: mem::take(&mut self.due_date),
        })
    }
}

/// Inline editor of an existing task, pre-filled from it.
#[derive(Debug, Clone)]
pub struct EditForm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
}

impl EditForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date_text(),
        }
    }

    pub fn can_save(&self) -> bool {
        validate_title(&self.title).is_ok()
    }

    pub fn save(&self) -> Option<TaskInput> {
        if !self.can_save() {
            return None;
        }
        Some(TaskInput {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date.clone(),
        })
    }
}
