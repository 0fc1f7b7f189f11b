//! Clients for the hosted backend.
//!
//! taskdeck keeps no data of its own: identities live in a GoTrue auth
//! service and tasks in a PostgREST `tasks` table, both exposed by a Supabase
//! project. This module defines the two seams the rest of the crate talks to
//! and the HTTP clients implementing them.
//!
//! ## Seams
//!
//! - [`AuthProvider`]: current user, sign in / sign up / sign out, and a watch
//!   channel announcing session changes
//! - [`TaskStore`]: select / insert / update / delete on the `tasks` table,
//!   implicitly scoped to the signed-in user by the service's row-level
//!   security
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskdeck::api::{AuthProvider, SupabaseAuth, SupabaseTasks, TaskStore};
//! use taskdeck::libs::config::Config;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::read()?;
//! let auth = Arc::new(SupabaseAuth::new(config.supabase()?));
//! auth.restore().await?;
//! let store = SupabaseTasks::new(config.supabase()?, auth.clone());
//! let tasks = store.fetch_all().await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::task::{NewTask, Task, TaskPatch};
use reqwest::Response;
use tokio::sync::watch;

pub mod auth;
pub mod error;
pub mod rest;

pub use auth::{AuthSession, SignUpOutcome, SupabaseAuth, User};
pub use error::ApiError;
pub use rest::SupabaseTasks;

/// Identity service the task controller depends on.
///
/// Every operation may fail with a message from the service. Session changes
/// (sign in, sign up with immediate session, sign out) are published on the
/// channel returned by [`AuthProvider::subscribe`].
#[allow(async_fn_in_trait)]
pub trait AuthProvider {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<User>;

    /// Signs in with email and password and makes the session current.
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, ApiError>;

    /// Creates an account.
    ///
    /// Depending on the project settings the service either signs the new
    /// user in right away or asks them to confirm their email first.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, ApiError>;

    /// Ends the current session. Local session state is dropped even when the
    /// service call fails.
    async fn sign_out(&self) -> Result<(), ApiError>;

    /// Receiver that always holds the current user.
    fn subscribe(&self) -> watch::Receiver<Option<User>>;
}

/// Remote `tasks` table.
///
/// Rows are scoped to the caller by the service; implementations never filter
/// by user themselves.
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    /// All visible rows ordered by `due_date` ascending.
    async fn fetch_all(&self) -> Result<Vec<Task>, ApiError>;

    /// Inserts one row and returns it as stored, with `id` and `created_at`.
    async fn insert(&self, task: &NewTask) -> Result<Task, ApiError>;

    /// Updates the fields present in `patch` on the row with `id`.
    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<(), ApiError>;

    /// Deletes the row with `id`.
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// Passes successful responses through and turns the rest into [`ApiError`].
pub(crate) async fn check_response(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status, &body))
}
