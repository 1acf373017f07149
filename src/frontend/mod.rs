//! Interactive terminal front end.
//!
//! Plays the role of the hosting screen: negotiates the permission gate at
//! startup, owns the session manager and the UI loop, and maps typed
//! commands to the start/stop/one-shot controls.

mod app;
mod commands;

pub use app::{reflect_permission, run, run_with_input};
pub use commands::Command;
