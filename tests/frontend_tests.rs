// Integration tests for the terminal front end
//
// These tests drive the run loop with piped command scripts and inspect the
// final surface state it returns.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use voxgate::config::{PermissionConfig, RecognitionConfig, ServiceConfig};
use voxgate::frontend;
use voxgate::permission::RequestVerdict;
use voxgate::recognition::Script;
use voxgate::Config;

fn demo_config(pre_granted: bool, rationale_advised: bool, verdict: RequestVerdict) -> Config {
    Config {
        service: ServiceConfig {
            name: "voxgate-test".to_string(),
        },
        permission: PermissionConfig {
            pre_granted,
            rationale_advised,
            verdict,
        },
        recognition: RecognitionConfig::default(),
    }
}

#[tokio::test]
async fn test_piped_start_sees_the_settled_permission() -> Result<()> {
    let config = demo_config(true, false, RequestVerdict::Granted);
    let input = BufReader::new(&b"start\nquit\n"[..]).lines();

    let surface = frontend::run_with_input(config, Script::immediate(vec![]), input).await?;

    assert!(surface.controls_enabled());
    assert_eq!(
        surface.last_notice(),
        None,
        "A granted permission must not trip the disabled-controls guard"
    );

    Ok(())
}

#[tokio::test]
async fn test_rationale_answer_does_not_swallow_later_commands() -> Result<()> {
    let config = demo_config(false, true, RequestVerdict::Granted);
    let input = BufReader::new(&b"y\nstart\nquit\n"[..]).lines();

    let surface = frontend::run_with_input(config, Script::immediate(vec![]), input).await?;

    assert!(
        surface.controls_enabled(),
        "Proceeding past the rationale should grant the permission"
    );
    assert_eq!(
        surface.last_notice(),
        None,
        "Commands piped after the rationale answer must reach the loop"
    );

    Ok(())
}

#[tokio::test]
async fn test_cancelled_rationale_keeps_controls_disabled() -> Result<()> {
    let config = demo_config(false, true, RequestVerdict::Granted);
    let input = BufReader::new(&b"n\nstart\nquit\n"[..]).lines();

    let surface = frontend::run_with_input(config, Script::immediate(vec![]), input).await?;

    assert!(!surface.controls_enabled());
    assert_eq!(
        surface.last_notice(),
        Some("controls are disabled until microphone permission is granted"),
        "A start under a denied permission trips the guard notice"
    );

    Ok(())
}
