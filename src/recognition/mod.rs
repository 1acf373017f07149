//! Speech recognition seams: the streaming backend trait, the one-shot
//! prompt trait, and the scripted adapters that stand in for a platform
//! recognition service.

mod backend;
mod event;
mod oneshot;
mod scripted;

pub use backend::{LanguageModel, ListenConfig, RecognizerFactory, RecognizerSource, SpeechBackend};
pub use event::{render_event, RecognizerEvent};
pub use oneshot::{
    OneShotLauncher, PromptReturn, RecognitionPrompt, Transcript, TranscriptError,
};
pub use scripted::{Cue, Script, ScriptedPrompt, ScriptedRecognizer};
