use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::event::RecognizerEvent;
use super::scripted::{Script, ScriptedRecognizer};

/// Language-model hint passed to the recognition service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageModel {
    /// Free-form dictation.
    #[default]
    FreeForm,
    /// Short, query-style phrases.
    WebSearch,
}

/// Configuration for one listening attempt, streaming or one-shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    pub language_model: LanguageModel,
    /// IETF language tag. The service default applies when unset.
    pub language: Option<String>,
    /// Whether interim hypotheses should be delivered.
    pub partial_results: bool,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            language_model: LanguageModel::FreeForm,
            language: None,
            partial_results: true,
        }
    }
}

/// A streaming recognition backend.
///
/// Implementations wrap a platform recognition service; the in-tree
/// [`ScriptedRecognizer`] replays a fixed script for demos and tests.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Begin a listening attempt.
    ///
    /// Returns the receiver carrying this attempt's events. The channel
    /// closes when the attempt ends, whether it ran to completion or was
    /// stopped. Backends reject a start while already listening.
    async fn start_listening(
        &mut self,
        config: &ListenConfig,
    ) -> Result<mpsc::Receiver<RecognizerEvent>>;

    /// Ask the service to stop capturing.
    ///
    /// Must be a no-op when idle, and must end the live event stream when
    /// there is one.
    async fn stop_listening(&mut self) -> Result<()>;

    /// Whether a listening attempt is currently live.
    fn is_listening(&self) -> bool;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Which recognizer integration to use.
#[derive(Debug, Clone)]
pub enum RecognizerSource {
    /// Replay a fixed event script.
    Scripted(Script),
    /// The host platform's recognition service.
    System,
}

/// Builds recognizer backends.
pub struct RecognizerFactory;

impl RecognizerFactory {
    pub fn create(source: RecognizerSource) -> Result<Box<dyn SpeechBackend>> {
        match source {
            RecognizerSource::Scripted(script) => Ok(Box::new(ScriptedRecognizer::new(script))),
            RecognizerSource::System => anyhow::bail!(
                "no system recognition service is available on this platform; \
                 use the scripted backend"
            ),
        }
    }
}
