//! Long-lived recognition session management.
//!
//! The [`SessionManager`] owns at most one recognizer handle for the
//! lifetime of the hosting screen: acquired on the first permission grant,
//! released exactly once at teardown. Between those points it starts and
//! stops streaming listening attempts and pumps their events to the UI.

mod manager;
mod stats;

pub use manager::{RecognitionSession, SessionError, SessionManager};
pub use stats::{SessionPhase, SessionStats};
