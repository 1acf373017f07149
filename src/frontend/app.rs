use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::commands::Command;
use crate::config::{BackendKind, Config};
use crate::permission::{
    dispatch, FixedPermission, OutcomeHandlers, PermissionGate, PermissionOutcome,
    RationaleChoice, RationalePrompt,
};
use crate::recognition::{
    ListenConfig, OneShotLauncher, RecognizerFactory, RecognizerSource, Script, ScriptedPrompt,
};
use crate::session::SessionManager;
use crate::ui::{UiHandle, UiLoop, UiSurface, UiUpdate};

/// Reflect a settled permission outcome on the UI.
///
/// Controls are enabled exactly when the permission was granted; every
/// other outcome leaves them disabled. The two denial shapes get distinct
/// one-time notices.
pub fn reflect_permission(outcome: PermissionOutcome, ui: &UiHandle) {
    ui.set_controls_enabled(outcome == PermissionOutcome::Granted);

    let denied_ui = ui.clone();
    let never_ui = ui.clone();
    dispatch(
        outcome,
        OutcomeHandlers {
            on_granted: Box::new(|| {}),
            on_rationale: Box::new(|| {}),
            on_denied: Box::new(move || denied_ui.notice("microphone access denied")),
            on_never_ask_again: Box::new(move || {
                never_ui.notice(
                    "microphone access permanently declined; enable it in system settings",
                )
            }),
        },
    );
}

/// Rationale modal rendered on the terminal.
///
/// Answers from the run loop's own line reader; a separate reader would
/// buffer ahead and discard piped commands that follow the answer.
struct LineRationale<'a, R> {
    input: Mutex<&'a mut Lines<BufReader<R>>>,
}

impl<'a, R> LineRationale<'a, R> {
    fn over(input: &'a mut Lines<BufReader<R>>) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }
}

#[async_trait]
impl<'a, R> RationalePrompt for LineRationale<'a, R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn confirm(&self) -> RationaleChoice {
        println!("this demo needs microphone access to show speech recognition.");
        println!("request the permission? [y/n]");
        let mut input = self.input.lock().await;
        match input.next_line().await {
            Ok(Some(line)) if line.trim().eq_ignore_ascii_case("y") => RationaleChoice::Proceed,
            _ => RationaleChoice::Cancel,
        }
    }
}

fn render_update(update: &UiUpdate) {
    match update {
        UiUpdate::SetLabel(text) => println!("label: {text}"),
        UiUpdate::SetControlsEnabled(enabled) => {
            println!(
                "controls {}",
                if *enabled { "enabled" } else { "disabled" }
            );
        }
        UiUpdate::Notice(text) => println!("notice: {text}"),
    }
}

/// Run the front end on stdin until the user quits or input closes.
pub async fn run(config: Config, script: Script) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin()).lines();
    run_with_input(config, script, input).await?;
    Ok(())
}

/// Run the front end over an arbitrary line source and return the final
/// surface state.
///
/// The binary feeds it stdin; tests feed it piped command scripts.
pub async fn run_with_input<R>(
    config: Config,
    script: Script,
    mut input: Lines<BufReader<R>>,
) -> Result<UiSurface>
where
    R: AsyncRead + Unpin + Send,
{
    let (mut ui_loop, ui) = UiLoop::new();

    let permission = FixedPermission::new(config.permission.status(), config.permission.verdict);
    let mut gate = PermissionGate::new();
    let outcome = {
        let rationale = LineRationale::over(&mut input);
        gate.negotiate(&permission, &rationale).await
    };
    reflect_permission(outcome, &ui);

    let listen = config.recognition.listen_config();
    let prompt = ScriptedPrompt::completing(script.one_shot.clone());
    let launcher = OneShotLauncher::new(ui.clone(), listen.clone());

    let mut manager = SessionManager::new(ui.clone());
    if outcome == PermissionOutcome::Granted {
        let backend = RecognizerFactory::create(match config.recognition.backend {
            BackendKind::Scripted => RecognizerSource::Scripted(script),
            BackendKind::System => RecognizerSource::System,
        })?;
        manager.initialize(move || backend);
    }

    // Apply the gate's queued updates before the first command is read; a
    // piped `start` must observe the settled controls flag.
    for update in ui_loop.drain_pending() {
        render_update(&update);
    }

    println!("{} ready; type `help` for commands", config.service.name);

    loop {
        tokio::select! {
            update = ui_loop.step() => {
                match update {
                    Some(update) => render_update(&update),
                    // Unreachable while we hold `ui`, but a closed channel
                    // means there is nothing left to display.
                    None => break,
                }
            }
            line = input.next_line() => {
                let Some(line) = line? else {
                    info!("input closed; shutting down");
                    break;
                };
                let Some(command) = Command::parse(&line) else {
                    if !line.trim().is_empty() {
                        println!("unknown command: {}", line.trim());
                    }
                    continue;
                };
                if !handle_command(command, &ui_loop, &ui, &manager, &launcher, &prompt, &listen)
                    .await
                {
                    break;
                }
            }
        }
    }

    manager.shutdown().await;
    for update in ui_loop.drain_pending() {
        render_update(&update);
    }
    Ok(ui_loop.surface().clone())
}

/// Execute one command. Returns `false` when the loop should exit.
async fn handle_command(
    command: Command,
    ui_loop: &UiLoop,
    ui: &UiHandle,
    manager: &SessionManager,
    launcher: &OneShotLauncher,
    prompt: &ScriptedPrompt,
    listen: &ListenConfig,
) -> bool {
    match command {
        Command::Start | Command::Stop | Command::Once
            if !ui_loop.surface().controls_enabled() =>
        {
            ui.notice("controls are disabled until microphone permission is granted");
        }
        Command::Start => {
            if let Err(e) = manager.start(listen).await {
                warn!("listening attempt rejected: {e}");
                println!("could not start listening: {e}");
            }
        }
        Command::Stop => manager.stop().await,
        Command::Once => match launcher.launch_once(prompt).await {
            Ok(Some(_)) => {}
            Ok(None) => println!("recognition returned without a transcript"),
            Err(e) => println!("one-shot recognition failed: {e}"),
        },
        Command::Status => {
            let stats = manager.stats().await;
            let started = stats
                .started_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "never".to_string());
            println!(
                "phase: {} | events seen: {} | last start: {}",
                stats.phase, stats.events_seen, started
            );
        }
        Command::Help => println!("{}", Command::help_text()),
        Command::Quit => return false,
    }
    true
}
