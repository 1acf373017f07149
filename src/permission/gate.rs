use tracing::{debug, info};

use super::platform::{
    MicrophonePermission, PermissionStatus, RationaleChoice, RationalePrompt, RequestVerdict,
};

/// Settled result of negotiating the microphone permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    /// Recognition features may be wired up.
    Granted,
    /// The platform wants the request explained before it is made.
    RationaleNeeded,
    /// Declined for now; the platform may allow asking again later.
    Denied,
    /// Declined permanently; only system settings can change it.
    NeverAskAgain,
}

/// Gate progress. `Granted`, `Denied` and `NeverAskAgain` are terminal:
/// once reached, the gate never prompts the user again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No negotiation has happened yet.
    Unrequested,
    /// The rationale modal is (or was) on screen.
    RationaleShown,
    Granted,
    Denied,
    NeverAskAgain,
}

/// One handler per permission outcome.
///
/// [`dispatch`] consumes the record and invokes exactly one slot, so a
/// caller cannot accidentally handle two outcomes for a single verdict or
/// leave one dangling.
pub struct OutcomeHandlers<'a> {
    pub on_granted: Box<dyn FnOnce() + 'a>,
    pub on_rationale: Box<dyn FnOnce() + 'a>,
    pub on_denied: Box<dyn FnOnce() + 'a>,
    pub on_never_ask_again: Box<dyn FnOnce() + 'a>,
}

/// Route one permission outcome to its handler slot.
pub fn dispatch(outcome: PermissionOutcome, handlers: OutcomeHandlers<'_>) {
    match outcome {
        PermissionOutcome::Granted => (handlers.on_granted)(),
        PermissionOutcome::RationaleNeeded => (handlers.on_rationale)(),
        PermissionOutcome::Denied => (handlers.on_denied)(),
        PermissionOutcome::NeverAskAgain => (handlers.on_never_ask_again)(),
    }
}

/// State machine that negotiates the microphone permission once.
///
/// Flow: check the current status; if a rationale is advised, show the
/// modal and only re-request on `Proceed` (`Cancel` counts as a denial);
/// otherwise request directly. Whatever verdict comes back settles the
/// gate, and later negotiations return the settled outcome without
/// touching the platform again.
pub struct PermissionGate {
    state: GateState,
}

impl PermissionGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Unrequested,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_settled(&self) -> bool {
        self.settled_outcome().is_some()
    }

    /// Negotiate the permission and return the settled outcome.
    pub async fn negotiate(
        &mut self,
        permission: &dyn MicrophonePermission,
        rationale: &dyn RationalePrompt,
    ) -> PermissionOutcome {
        if let Some(settled) = self.settled_outcome() {
            debug!(?settled, "permission gate already settled");
            return settled;
        }

        match permission.status().await {
            PermissionStatus::Granted => {
                info!("microphone permission already granted");
                self.state = GateState::Granted;
                PermissionOutcome::Granted
            }
            PermissionStatus::NotGranted {
                rationale_advised: true,
            } => {
                self.state = GateState::RationaleShown;
                match rationale.confirm().await {
                    RationaleChoice::Proceed => {
                        debug!("rationale accepted; requesting microphone permission");
                        self.settle(permission.request().await)
                    }
                    RationaleChoice::Cancel => {
                        info!("rationale declined; treating microphone permission as denied");
                        self.state = GateState::Denied;
                        PermissionOutcome::Denied
                    }
                }
            }
            PermissionStatus::NotGranted {
                rationale_advised: false,
            } => {
                debug!("requesting microphone permission");
                self.settle(permission.request().await)
            }
        }
    }

    fn settle(&mut self, verdict: RequestVerdict) -> PermissionOutcome {
        let outcome = match verdict {
            RequestVerdict::Granted => {
                self.state = GateState::Granted;
                PermissionOutcome::Granted
            }
            RequestVerdict::Denied => {
                self.state = GateState::Denied;
                PermissionOutcome::Denied
            }
            RequestVerdict::DeniedPermanently => {
                self.state = GateState::NeverAskAgain;
                PermissionOutcome::NeverAskAgain
            }
        };
        info!(?outcome, "microphone permission settled");
        outcome
    }

    fn settled_outcome(&self) -> Option<PermissionOutcome> {
        match self.state {
            GateState::Granted => Some(PermissionOutcome::Granted),
            GateState::Denied => Some(PermissionOutcome::Denied),
            GateState::NeverAskAgain => Some(PermissionOutcome::NeverAskAgain),
            GateState::Unrequested | GateState::RationaleShown => None,
        }
    }
}

impl Default for PermissionGate {
    fn default() -> Self {
        Self::new()
    }
}
