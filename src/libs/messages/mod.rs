//! User-facing messages and the macros that print them.
//!
//! [`Message`] holds every string the application shows; the `msg_*!` macros
//! in [`macros`] decide whether it goes to the terminal or to `tracing`.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
