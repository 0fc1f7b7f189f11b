//! # Taskdeck - personal to-do list on a hosted backend
//!
//! A command-line to-do manager whose tasks live in a Supabase project:
//! accounts are handled by its auth service and tasks by a row-level-secured
//! `tasks` table, so every user only ever sees their own rows.
//!
//! ## Features
//!
//! - **Accounts**: Sign up, sign in and sign out; sessions persist encrypted between runs
//! - **Task Management**: Add, edit, complete, reopen and delete tasks
//! - **Filtering**: All, active or completed views
//! - **Due Dates**: Overdue flags and "days left" countdowns for active tasks
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdeck::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
