use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::backend::{ListenConfig, SpeechBackend};
use super::event::RecognizerEvent;
use super::oneshot::{PromptReturn, RecognitionPrompt, Transcript};

/// One scripted step: wait, then deliver the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cue {
    /// Delay before the event fires, in milliseconds.
    #[serde(default)]
    pub after_ms: u64,
    pub event: RecognizerEvent,
}

/// A deterministic recognizer script: the event cues one streaming attempt
/// replays, plus the candidates the scripted one-shot prompt completes with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub cues: Vec<Cue>,
    #[serde(default)]
    pub one_shot: Vec<String>,
}

impl Script {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self {
            cues,
            one_shot: Vec::new(),
        }
    }

    /// Script that fires every event immediately. Handy in tests.
    pub fn immediate(events: Vec<RecognizerEvent>) -> Self {
        let cues = events
            .into_iter()
            .map(|event| Cue { after_ms: 0, event })
            .collect();
        Self::new(cues)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The built-in demonstration script played when no script file is
    /// supplied.
    pub fn demo() -> Self {
        let cues = vec![
            Cue {
                after_ms: 300,
                event: RecognizerEvent::ReadyForSpeech,
            },
            Cue {
                after_ms: 500,
                event: RecognizerEvent::BeginningOfSpeech,
            },
            Cue {
                after_ms: 200,
                event: RecognizerEvent::RmsChanged { level: 4.2 },
            },
            Cue {
                after_ms: 300,
                event: RecognizerEvent::PartialResults {
                    candidates: vec!["hello".to_string()],
                },
            },
            Cue {
                after_ms: 200,
                event: RecognizerEvent::BufferReceived { bytes: 3200 },
            },
            Cue {
                after_ms: 400,
                event: RecognizerEvent::EndOfSpeech,
            },
            Cue {
                after_ms: 300,
                event: RecognizerEvent::FinalResults {
                    candidates: vec!["hello world".to_string(), "hello word".to_string()],
                },
            },
        ];
        Self {
            cues,
            one_shot: vec!["hello world".to_string()],
        }
    }
}

/// Replays a fixed script as if it were a live recognition service.
///
/// Each `start_listening` spawns a playback task that delivers the cues in
/// order; `stop_listening` aborts playback, which closes the event stream
/// without synthesizing further events.
pub struct ScriptedRecognizer {
    script: Script,
    listening: Arc<AtomicBool>,
    playback: Option<JoinHandle<()>>,
}

impl ScriptedRecognizer {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            listening: Arc::new(AtomicBool::new(false)),
            playback: None,
        }
    }
}

#[async_trait]
impl SpeechBackend for ScriptedRecognizer {
    async fn start_listening(
        &mut self,
        config: &ListenConfig,
    ) -> Result<mpsc::Receiver<RecognizerEvent>> {
        if self.listening.load(Ordering::SeqCst) {
            // A real service reports busy; reject the same way.
            bail!("recognizer is busy with another listening attempt");
        }

        debug!(
            model = ?config.language_model,
            cues = self.script.cues.len(),
            "scripted recognizer starting"
        );

        let (tx, rx) = mpsc::channel(32);
        self.listening.store(true, Ordering::SeqCst);

        let cues = self.script.cues.clone();
        let listening = Arc::clone(&self.listening);
        self.playback = Some(tokio::spawn(async move {
            for cue in cues {
                if cue.after_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(cue.after_ms)).await;
                }
                if tx.send(cue.event).await.is_err() {
                    // Consumer went away; nothing left to deliver.
                    break;
                }
            }
            listening.store(false, Ordering::SeqCst);
        }));

        Ok(rx)
    }

    async fn stop_listening(&mut self) -> Result<()> {
        if let Some(playback) = self.playback.take() {
            // Dropping the playback task drops the sender, which ends the
            // event stream. Undelivered cues are discarded.
            playback.abort();
            let _ = playback.await;
        }
        self.listening.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// One-shot prompt that resolves to a canned outcome.
pub struct ScriptedPrompt {
    outcome: PromptReturn,
}

impl ScriptedPrompt {
    pub fn new(outcome: PromptReturn) -> Self {
        Self { outcome }
    }

    /// Prompt that completes with the given candidates.
    pub fn completing<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PromptReturn::Completed(Transcript::from_candidates(
            candidates,
        )))
    }
}

#[async_trait]
impl RecognitionPrompt for ScriptedPrompt {
    async fn launch(&self, config: &ListenConfig) -> Result<PromptReturn> {
        debug!(model = ?config.language_model, "scripted one-shot prompt launched");
        Ok(self.outcome.clone())
    }
}
