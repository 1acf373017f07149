use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Pre-request permission status reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Already granted; no prompt is needed.
    Granted,
    /// Not granted yet. The platform may advise explaining the request
    /// before showing the system prompt.
    NotGranted { rationale_advised: bool },
}

/// The user's decision after an actual permission request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestVerdict {
    #[default]
    Granted,
    /// Declined, but the platform may ask again later.
    Denied,
    /// Declined with no further prompts allowed.
    DeniedPermanently,
}

/// The platform's runtime-permission subsystem for microphone access.
#[async_trait]
pub trait MicrophonePermission: Send + Sync {
    /// Current status, without prompting the user.
    async fn status(&self) -> PermissionStatus;

    /// Show the system prompt and report the user's decision.
    async fn request(&self) -> RequestVerdict;
}

/// User's choice on the rationale modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RationaleChoice {
    /// Go ahead with the permission request.
    Proceed,
    /// Abandon the request.
    Cancel,
}

/// Blocking two-choice modal shown when the platform advises a rationale.
#[async_trait]
pub trait RationalePrompt: Send + Sync {
    async fn confirm(&self) -> RationaleChoice;
}

/// Permission adapter that answers from fixed values and counts how many
/// prompts it showed. Used by the demo front end and the test suite.
pub struct FixedPermission {
    status: PermissionStatus,
    verdict: RequestVerdict,
    requests: AtomicUsize,
}

impl FixedPermission {
    pub fn new(status: PermissionStatus, verdict: RequestVerdict) -> Self {
        Self {
            status,
            verdict,
            requests: AtomicUsize::new(0),
        }
    }

    /// Adapter for a platform that granted the permission long ago.
    pub fn granted() -> Self {
        Self::new(PermissionStatus::Granted, RequestVerdict::Granted)
    }

    /// How many times the system prompt was shown.
    pub fn requests_made(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MicrophonePermission for FixedPermission {
    async fn status(&self) -> PermissionStatus {
        self.status
    }

    async fn request(&self) -> RequestVerdict {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.verdict
    }
}

/// Rationale modal that always answers the same way and counts showings.
pub struct FixedRationale {
    choice: RationaleChoice,
    shown: AtomicUsize,
}

impl FixedRationale {
    pub fn new(choice: RationaleChoice) -> Self {
        Self {
            choice,
            shown: AtomicUsize::new(0),
        }
    }

    pub fn times_shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RationalePrompt for FixedRationale {
    async fn confirm(&self) -> RationaleChoice {
        self.shown.fetch_add(1, Ordering::SeqCst);
        self.choice
    }
}
