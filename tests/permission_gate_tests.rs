// Tests for the microphone permission gate
//
// These tests verify outcome dispatch, the gate state machine, and how a
// settled outcome is reflected on the UI surface.

use std::sync::atomic::{AtomicUsize, Ordering};

use voxgate::frontend::reflect_permission;
use voxgate::permission::{
    dispatch, FixedPermission, FixedRationale, GateState, OutcomeHandlers, PermissionGate,
    PermissionOutcome, PermissionStatus, RationaleChoice, RequestVerdict,
};
use voxgate::ui::UiLoop;

#[test]
fn test_dispatch_invokes_exactly_one_handler() {
    let outcomes = [
        PermissionOutcome::Granted,
        PermissionOutcome::RationaleNeeded,
        PermissionOutcome::Denied,
        PermissionOutcome::NeverAskAgain,
    ];

    for (index, outcome) in outcomes.into_iter().enumerate() {
        let counters: [AtomicUsize; 4] = Default::default();

        dispatch(
            outcome,
            OutcomeHandlers {
                on_granted: Box::new(|| {
                    counters[0].fetch_add(1, Ordering::SeqCst);
                }),
                on_rationale: Box::new(|| {
                    counters[1].fetch_add(1, Ordering::SeqCst);
                }),
                on_denied: Box::new(|| {
                    counters[2].fetch_add(1, Ordering::SeqCst);
                }),
                on_never_ask_again: Box::new(|| {
                    counters[3].fetch_add(1, Ordering::SeqCst);
                }),
            },
        );

        for (slot, counter) in counters.iter().enumerate() {
            let expected = usize::from(slot == index);
            assert_eq!(
                counter.load(Ordering::SeqCst),
                expected,
                "{outcome:?} must invoke its own slot and nothing else"
            );
        }
    }
}

#[tokio::test]
async fn test_already_granted_skips_the_prompt() {
    let permission = FixedPermission::new(PermissionStatus::Granted, RequestVerdict::Denied);
    let rationale = FixedRationale::new(RationaleChoice::Cancel);
    let mut gate = PermissionGate::new();

    let outcome = gate.negotiate(&permission, &rationale).await;

    assert_eq!(outcome, PermissionOutcome::Granted);
    assert_eq!(gate.state(), GateState::Granted);
    assert_eq!(
        permission.requests_made(),
        0,
        "No prompt when the permission is already granted"
    );
    assert_eq!(rationale.times_shown(), 0);
}

#[tokio::test]
async fn test_direct_request_settles_on_the_verdict() {
    let permission = FixedPermission::new(
        PermissionStatus::NotGranted {
            rationale_advised: false,
        },
        RequestVerdict::Granted,
    );
    let rationale = FixedRationale::new(RationaleChoice::Cancel);
    let mut gate = PermissionGate::new();

    let outcome = gate.negotiate(&permission, &rationale).await;

    assert_eq!(outcome, PermissionOutcome::Granted);
    assert_eq!(permission.requests_made(), 1);
    assert_eq!(
        rationale.times_shown(),
        0,
        "No rationale when the platform does not advise one"
    );
}

#[tokio::test]
async fn test_rationale_proceed_requests_the_permission() {
    let permission = FixedPermission::new(
        PermissionStatus::NotGranted {
            rationale_advised: true,
        },
        RequestVerdict::Granted,
    );
    let rationale = FixedRationale::new(RationaleChoice::Proceed);
    let mut gate = PermissionGate::new();

    let outcome = gate.negotiate(&permission, &rationale).await;

    assert_eq!(outcome, PermissionOutcome::Granted);
    assert_eq!(rationale.times_shown(), 1);
    assert_eq!(
        permission.requests_made(),
        1,
        "Proceed must re-request the permission"
    );
    assert_eq!(gate.state(), GateState::Granted);
}

#[tokio::test]
async fn test_rationale_cancel_counts_as_denied() {
    let permission = FixedPermission::new(
        PermissionStatus::NotGranted {
            rationale_advised: true,
        },
        RequestVerdict::Granted,
    );
    let rationale = FixedRationale::new(RationaleChoice::Cancel);
    let mut gate = PermissionGate::new();

    let outcome = gate.negotiate(&permission, &rationale).await;

    assert_eq!(outcome, PermissionOutcome::Denied);
    assert_eq!(gate.state(), GateState::Denied);
    assert_eq!(
        permission.requests_made(),
        0,
        "Cancel must abandon the request entirely"
    );
}

#[tokio::test]
async fn test_permanent_denial_settles_never_ask_again() {
    let permission = FixedPermission::new(
        PermissionStatus::NotGranted {
            rationale_advised: true,
        },
        RequestVerdict::DeniedPermanently,
    );
    let rationale = FixedRationale::new(RationaleChoice::Proceed);
    let mut gate = PermissionGate::new();

    let outcome = gate.negotiate(&permission, &rationale).await;

    assert_eq!(outcome, PermissionOutcome::NeverAskAgain);
    assert_eq!(gate.state(), GateState::NeverAskAgain);
}

#[tokio::test]
async fn test_settled_gate_never_prompts_again() {
    let permission = FixedPermission::new(
        PermissionStatus::NotGranted {
            rationale_advised: false,
        },
        RequestVerdict::Denied,
    );
    let rationale = FixedRationale::new(RationaleChoice::Proceed);
    let mut gate = PermissionGate::new();

    let first = gate.negotiate(&permission, &rationale).await;
    let second = gate.negotiate(&permission, &rationale).await;

    assert_eq!(first, PermissionOutcome::Denied);
    assert_eq!(second, PermissionOutcome::Denied, "Settled outcome is reused");
    assert_eq!(
        permission.requests_made(),
        1,
        "The user must not be prompted twice"
    );
    assert!(gate.is_settled());
}

#[test]
fn test_controls_enabled_only_when_granted() {
    let cases = [
        (PermissionOutcome::Granted, true),
        (PermissionOutcome::RationaleNeeded, false),
        (PermissionOutcome::Denied, false),
        (PermissionOutcome::NeverAskAgain, false),
    ];

    for (outcome, expected) in cases {
        let (mut ui_loop, ui) = UiLoop::new();

        reflect_permission(outcome, &ui);
        ui_loop.drain_pending();

        assert_eq!(
            ui_loop.surface().controls_enabled(),
            expected,
            "{outcome:?} should leave controls enabled={expected}"
        );
    }
}

#[test]
fn test_denial_notices_are_distinct() {
    let (mut denied_loop, denied_ui) = UiLoop::new();
    reflect_permission(PermissionOutcome::Denied, &denied_ui);
    denied_loop.drain_pending();

    let (mut never_loop, never_ui) = UiLoop::new();
    reflect_permission(PermissionOutcome::NeverAskAgain, &never_ui);
    never_loop.drain_pending();

    let denied_notice = denied_loop
        .surface()
        .last_notice()
        .expect("denial should post a notice")
        .to_string();
    let never_notice = never_loop
        .surface()
        .last_notice()
        .expect("permanent denial should post a notice")
        .to_string();

    assert_ne!(
        denied_notice, never_notice,
        "The two denial shapes must be distinguishable"
    );
    assert_eq!(
        denied_loop.surface().label(),
        "",
        "Notices must not touch the label"
    );
}
