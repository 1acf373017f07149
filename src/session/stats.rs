use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the session manager currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionPhase {
    /// No recognizer handle exists yet.
    Uninitialized,
    /// A handle exists but no listening attempt is live.
    Active,
    /// A listening attempt is live.
    Listening,
    /// The handle was released; the manager is finished.
    Stopped,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            SessionPhase::Uninitialized => "uninitialized",
            SessionPhase::Active => "active",
            SessionPhase::Listening => "listening",
            SessionPhase::Stopped => "stopped",
        };
        write!(f, "{phase}")
    }
}

/// Snapshot of the recognition session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub phase: SessionPhase,

    /// When the most recent listening attempt started.
    pub started_at: Option<DateTime<Utc>>,

    /// Recognizer events received across all attempts, whether or not they
    /// were surfaced.
    pub events_seen: usize,
}
