use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::backend::ListenConfig;
use crate::ui::UiHandle;

/// Candidate transcripts returned by a completed recognition prompt,
/// ordered best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    candidates: Vec<String>,
}

impl Transcript {
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    pub fn from_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(candidates.into_iter().map(Into::into).collect())
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The best candidate, or an explicit error when the service returned
    /// none. Services can legally complete with an empty list.
    pub fn best(&self) -> Result<&str, TranscriptError> {
        self.candidates
            .first()
            .map(String::as_str)
            .ok_or(TranscriptError::NoCandidates)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TranscriptError {
    #[error("recognition completed with no transcript candidates")]
    NoCandidates,
}

/// Completion signal from the navigate-and-return recognition screen.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptReturn {
    /// The screen finished and produced a transcript (possibly empty).
    Completed(Transcript),
    /// The user backed out of the screen.
    Cancelled,
    /// The screen reported a failure code.
    Failed(i32),
}

/// The platform's one-shot recognition screen: launched with a listening
/// configuration, resolves to exactly one completion signal.
#[async_trait]
pub trait RecognitionPrompt: Send + Sync {
    async fn launch(&self, config: &ListenConfig) -> Result<PromptReturn>;
}

/// Drives the one-shot path: launch the prompt, await its return, display
/// the first candidate.
///
/// Independent of the streaming session; the two paths share no state.
pub struct OneShotLauncher {
    ui: UiHandle,
    config: ListenConfig,
}

impl OneShotLauncher {
    pub fn new(ui: UiHandle, config: ListenConfig) -> Self {
        Self { ui, config }
    }

    /// Launch the prompt and reflect its outcome on the UI.
    ///
    /// Only a completed prompt with at least one candidate updates the
    /// label; cancellation and failure leave it untouched. A completed
    /// prompt with zero candidates is surfaced as an error instead of
    /// being read past.
    pub async fn launch_once(&self, prompt: &dyn RecognitionPrompt) -> Result<Option<String>> {
        match prompt.launch(&self.config).await? {
            PromptReturn::Completed(transcript) => {
                let best = transcript.best()?.to_string();
                info!(
                    candidates = transcript.len(),
                    "one-shot recognition completed"
                );
                self.ui.set_label(best.clone());
                Ok(Some(best))
            }
            PromptReturn::Cancelled => {
                info!("one-shot recognition cancelled by the user");
                Ok(None)
            }
            PromptReturn::Failed(code) => {
                warn!(code, "one-shot recognition failed");
                Ok(None)
            }
        }
    }
}
