//! Task state controller.
//!
//! [`TaskController`] owns the in-memory list of the signed-in user's tasks
//! and is the only thing allowed to change it. Each mutation goes to the
//! [`TaskStore`] first; the local list is patched only once the store has
//! accepted it, so a failed call needs no rollback.
//!
//! ## Error Banner
//!
//! Operations never return errors. A failure is logged, turned into one
//! human-readable message (the store's own message when it has one, else a
//! per-operation default such as "Failed to add task") and kept as the single
//! current error, replacing whatever was there before. Successful calls leave
//! the previous error in place; [`TaskController::clear_error`] dismisses it.
//!
//! ## Session Changes
//!
//! [`TaskController::on_session_change`] follows the auth provider: a user
//! appearing triggers exactly one [`TaskController::load`], the user going
//! away resets the controller to its initial state.
//!
//! ## Ordering and Races
//!
//! Only `load` sorts (by due date, ascending). Added tasks are appended and
//! edits patch in place without re-sorting. Mutators take `&mut self`, so one
//! controller has at most one call in flight; two controllers sharing a store
//! race with last-write-wins, which is accepted.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdeck::api::TaskStore;
//! use taskdeck::libs::controller::TaskController;
//! use taskdeck::libs::task::TaskFilter;
//!
//! async fn show<S: TaskStore>(controller: &mut TaskController<S>) {
//!     controller.load().await;
//!     for task in controller.filtered(TaskFilter::Active) {
//!         println!("{}", task.title);
//!     }
//!     if let Some(error) = controller.error() {
//!         eprintln!("{}", error);
//!     }
//! }
//! ```

use super::messages::Message;
use super::task::{parse_due_date, NewTask, Task, TaskFilter, TaskPatch};
use crate::api::{ApiError, TaskStore, User};
use crate::msg_debug;
use std::fmt::Display;
use tokio::sync::watch;

pub struct TaskController<S: TaskStore> {
    store: S,
    user: Option<User>,
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
}

impl<S: TaskStore> TaskController<S> {
    /// A signed-out controller: no tasks, loading, no error.
    pub fn new(store: S) -> Self {
        Self {
            store,
            user: None,
            tasks: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Visible subset for `filter`, in list order.
    pub fn filtered(&self, filter: TaskFilter) -> Vec<&Task> {
        filter.apply(&self.tasks)
    }

    /// True until the first fetch for the current session has finished.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies a session transition reported by the auth provider.
    pub async fn on_session_change(&mut self, user: Option<User>) {
        let current_id = self.user.as_ref().map(|current| current.id.clone());
        match (current_id, user) {
            (Some(current_id), Some(next)) if current_id == next.id => {
                self.user = Some(next);
            }
            (_, Some(next)) => {
                msg_debug!(format!("session started for user {}", next.id));
                self.reset();
                self.user = Some(next);
                self.load().await;
            }
            (Some(_), None) => {
                msg_debug!("session ended, clearing tasks");
                self.reset();
            }
            (None, None) => {}
        }
    }

    /// Catches up with the latest value published on `session`.
    pub async fn sync_session(&mut self, session: &mut watch::Receiver<Option<User>>) {
        let user = session.borrow_and_update().clone();
        self.on_session_change(user).await;
    }

    fn reset(&mut self) {
        self.user = None;
        self.tasks.clear();
        self.loading = true;
        self.error = None;
    }

    /// Replaces the list with the store's rows, sorted by due date.
    ///
    /// On failure the previous list is kept.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.store.fetch_all().await {
            Ok(mut tasks) => {
                tasks.sort_by_key(|task| task.due_date);
                self.tasks = tasks;
            }
            Err(e) => self.fail(Message::FetchTasksFailed, &e),
        }
        self.loading = false;
    }

    /// Inserts a new active task and appends the stored row.
    ///
    /// The title is sent as given; blank titles are stopped by the add form,
    /// not here. An unparseable due date or a missing session fails before
    /// the store is called.
    pub async fn add(&mut self, title: &str, description: &str, due_date_text: &str) {
        let due_date = match parse_due_date(due_date_text) {
            Ok(due_date) => due_date,
            Err(e) => return self.fail(Message::AddTaskFailed, &e),
        };
        let Some(user) = &self.user else {
            return self.fail(Message::AddTaskFailed, &ApiError::NotSignedIn);
        };

        let new_task = NewTask::new(&user.id, title, description, due_date);
        match self.store.insert(&new_task).await {
            Ok(task) => {
                msg_debug!(format!("added task {}", task.id));
                self.tasks.push(task);
            }
            Err(e) => self.fail(Message::AddTaskFailed, &e),
        }
    }

    /// Flips `completed` on the task with `id`.
    ///
    /// Unknown ids are ignored: no store call, no error.
    pub async fn toggle(&mut self, id: &str) {
        let Some(completed) = self.task(id).map(|task| !task.completed) else {
            msg_debug!(format!("toggle ignored, no task {}", id));
            return;
        };

        match self.store.update(id, &TaskPatch::completion(completed)).await {
            Ok(()) => {
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
                    task.completed = completed;
                }
            }
            Err(e) => self.fail(Message::UpdateTaskFailed, &e),
        }
    }

    /// Deletes the task with `id` from the store, then from the list.
    pub async fn remove(&mut self, id: &str) {
        match self.store.delete(id).await {
            Ok(()) => self.tasks.retain(|task| task.id != id),
            Err(e) => self.fail(Message::DeleteTaskFailed, &e),
        }
    }

    /// Replaces title, description and due date of the task with `id`.
    ///
    /// `completed` is never touched by an edit.
    pub async fn edit(&mut self, id: &str, title: &str, description: &str, due_date_text: &str) {
        let due_date = match parse_due_date(due_date_text) {
            Ok(due_date) => due_date,
            Err(e) => return self.fail(Message::EditTaskFailed, &e),
        };

        let patch = TaskPatch::details(title, description, due_date);
        match self.store.update(id, &patch).await {
            Ok(()) => {
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
                    patch.apply_to(task);
                }
            }
            Err(e) => self.fail(Message::EditTaskFailed, &e),
        }
    }

    fn fail(&mut self, default: Message, error: &dyn FailureMessage) {
        tracing::error!("{}: {}", default, error);
        self.error = Some(error.banner().unwrap_or_else(|| default.to_string()));
    }
}

/// Text an operation failure contributes to the error banner.
trait FailureMessage: Display {
    fn banner(&self) -> Option<String>;
}

impl FailureMessage for ApiError {
    fn banner(&self) -> Option<String> {
        self.message()
    }
}

impl FailureMessage for super::form::ValidationError {
    fn banner(&self) -> Option<String> {
        Some(self.to_string())
    }
}
