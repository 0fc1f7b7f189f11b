//! Display implementation for taskdeck application messages.
//!
//! All user-facing wording is defined here, in one place, so that commands and
//! library code only ever deal with structured [`Message`] values. Messages
//! with dynamic content interpolate their parameters:
//!
//! ```rust
//! use taskdeck::libs::messages::Message;
//!
//! assert_eq!(Message::DaysLeft(4).to_string(), "4 days left");
//! assert_eq!(Message::FetchTasksFailed.to_string(), "Failed to fetch tasks");
//! ```

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    /// Formats the message as human-readable text for terminal output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskCompleted(title) => format!("Task '{}' marked as completed", title),
            Message::TaskReopened(title) => format!("Task '{}' marked as active", title),
            Message::TaskNotFound(id) => format!("Task with ID {} not found.", id),
            Message::TasksHeader(filter) => format!("Tasks ({}):", filter),
            Message::NoTasksFound => "No tasks found".to_string(),
            Message::StartByAddingTask => "Start by adding a new task".to_string(),
            Message::NoFilteredTasks(filter) => format!("No {} tasks available", filter),
            Message::LoadingTasks => "Loading tasks...".to_string(),
            Message::TaskCountSummary { shown, total } => format!("Showing {} of {} task(s)", shown, total),

            // === TASK FAILURES ===
            Message::FetchTasksFailed => "Failed to fetch tasks".to_string(),
            Message::AddTaskFailed => "Failed to add task".to_string(),
            Message::UpdateTaskFailed => "Failed to update task".to_string(),
            Message::DeleteTaskFailed => "Failed to delete task".to_string(),
            Message::EditTaskFailed => "Failed to edit task".to_string(),

            // === DUE STATUS ===
            Message::Overdue => "Overdue".to_string(),
            Message::DueToday => "Due today".to_string(),
            Message::DueTomorrow => "Due tomorrow".to_string(),
            Message::DaysLeft(days) => format!("{} days left", days),

            // === AUTHENTICATION MESSAGES ===
            Message::NotSignedIn => "You are not signed in. Run `taskdeck login <email>` first.".to_string(),
            Message::SignedInAs(email) => format!("Signed in as {}", email),
            Message::SignedOut => "Signed out".to_string(),
            Message::AccountCreated(email) => format!("Account created for {}", email),
            Message::ConfirmEmailSent(email) => format!("Check {} for a confirmation link, then sign in.", email),
            Message::AuthFailed => "An error occurred".to_string(),
            Message::SessionRestoreFailed(error) => format!("Failed to restore saved session: {}", error),
            Message::SignOutIncomplete(error) => format!("Signed out locally, but the server session could not be revoked: {}", error),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleSupabase => "Supabase settings".to_string(),
            Message::SupabaseNotConfigured => "Supabase is not configured. Run `taskdeck init` or set TASKDECK_SUPABASE_URL and TASKDECK_SUPABASE_ANON_KEY.".to_string(),

            // === PROMPTS ===
            Message::PromptSupabaseUrl => "Enter your Supabase project URL".to_string(),
            Message::PromptSupabaseAnonKey => "Enter your Supabase anon key".to_string(),
            Message::PromptPassword => "Enter your password".to_string(),
            Message::PromptCreatePassword(min) => format!("Create a password (at least {} characters)", min),
            Message::PromptConfirmPassword => "Repeat the password".to_string(),
            Message::PasswordMismatch => "Passwords do not match".to_string(),
            Message::PromptTaskTitle => "Task title".to_string(),
            Message::PromptTaskDescription => "Description (optional)".to_string(),
            Message::PromptTaskDueDate => "Due date (YYYY-MM-DD)".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
