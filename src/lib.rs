pub mod config;
pub mod frontend;
pub mod permission;
pub mod recognition;
pub mod session;
pub mod ui;

pub use config::{BackendKind, Config};
pub use permission::{
    dispatch, FixedPermission, FixedRationale, GateState, MicrophonePermission, OutcomeHandlers,
    PermissionGate, PermissionOutcome, PermissionStatus, RationaleChoice, RationalePrompt,
    RequestVerdict,
};
pub use recognition::{
    render_event, Cue, LanguageModel, ListenConfig, OneShotLauncher, PromptReturn,
    RecognitionPrompt, RecognizerEvent, RecognizerFactory, RecognizerSource, Script,
    ScriptedPrompt, ScriptedRecognizer, SpeechBackend, Transcript, TranscriptError,
};
pub use session::{RecognitionSession, SessionError, SessionManager, SessionPhase, SessionStats};
pub use ui::{UiHandle, UiLoop, UiSurface, UiUpdate};
