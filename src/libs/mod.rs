//! Core library modules for the taskdeck application.
//!
//! Everything here is independent of the command line: the commands in
//! [`crate::commands`] only parse arguments, prompt and print, and leave
//! state, validation and formatting to these modules.
//!
//! ## Features
//!
//! - **Task State**: [`controller`] owns the task list and the error banner
//! - **Domain Model**: [`task`] rows, patches, filter modes and due badges
//! - **Forms**: [`form`] field validation for auth and task input
//! - **Infrastructure**: configuration, data directory, encrypted session cache, messaging
//! - **User Interface**: console tables in [`view`]
//!
//! ## Usage
//!
//! ```rust
//! use taskdeck::libs::form::{validate_email, validate_title};
//!
//! assert!(validate_email("foo@bar.com").is_ok());
//! assert!(validate_title("   ").is_err());
//! ```

pub mod config;
pub mod controller;
pub mod data_storage;
pub mod form;
pub mod messages;
pub mod session_cache;
pub mod task;
pub mod view;
