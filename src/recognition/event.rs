use serde::{Deserialize, Serialize};

/// Lifecycle and result events delivered by a streaming recognizer.
///
/// This mirrors the callback surface of platform recognition services. The
/// variants carry only what the front end needs; raw audio is reduced to a
/// byte count and service-specific events to an opaque code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RecognizerEvent {
    /// The service is ready for the user to start speaking.
    ReadyForSpeech,
    /// The user has started speaking.
    BeginningOfSpeech,
    /// The user has stopped speaking.
    EndOfSpeech,
    /// Interim hypotheses for the utterance so far.
    PartialResults { candidates: Vec<String> },
    /// The service handed back a chunk of captured audio.
    BufferReceived { bytes: usize },
    /// Input level changed. Deliberately never surfaced.
    RmsChanged { level: f32 },
    /// A service-specific event identified only by its code.
    Event { code: i32 },
    /// The listening attempt failed.
    Error { code: i32 },
    /// Final candidate transcripts, best first.
    FinalResults { candidates: Vec<String> },
}

/// Label text for one recognizer event, or `None` when the event is not
/// surfaced at all.
///
/// Every rendered event overwrites the label. Errors stay opaque (the code
/// is logged, not displayed) and final results show the first candidate.
pub fn render_event(event: &RecognizerEvent) -> Option<String> {
    let label = match event {
        RecognizerEvent::ReadyForSpeech => "ready for speech".to_string(),
        RecognizerEvent::BeginningOfSpeech => "speech started".to_string(),
        RecognizerEvent::EndOfSpeech => "speech ended".to_string(),
        RecognizerEvent::PartialResults { .. } => "partial results".to_string(),
        RecognizerEvent::BufferReceived { .. } => "audio buffer received".to_string(),
        RecognizerEvent::RmsChanged { .. } => return None,
        RecognizerEvent::Event { .. } => "recognizer event".to_string(),
        RecognizerEvent::Error { .. } => "recognition error".to_string(),
        RecognizerEvent::FinalResults { candidates } => match candidates.first() {
            Some(best) => format!("results: {best}"),
            None => "results: (none)".to_string(),
        },
    };
    Some(label)
}
