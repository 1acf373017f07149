//! Runtime microphone-permission negotiation.
//!
//! The [`PermissionGate`] drives the platform's permission subsystem through
//! a small state machine and settles on one terminal outcome. Consumers
//! react to the outcome through [`dispatch`], which routes it to exactly one
//! handler slot.

mod gate;
mod platform;

pub use gate::{dispatch, GateState, OutcomeHandlers, PermissionGate, PermissionOutcome};
pub use platform::{
    FixedPermission, FixedRationale, MicrophonePermission, PermissionStatus, RationaleChoice,
    RationalePrompt, RequestVerdict,
};
