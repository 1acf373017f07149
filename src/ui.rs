//! UI surface state and the update-marshaling primitive.
//!
//! The front end owns a single event loop; everything that wants to change
//! what the user sees (recognizer callbacks, permission verdicts, one-shot
//! completions) posts a [`UiUpdate`] through a [`UiHandle`]. The loop applies
//! updates strictly in arrival order, so the surface is only ever mutated
//! from one place.

use tokio::sync::mpsc;
use tracing::warn;

/// A single UI mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// Replace the label text. Each update overwrites the previous one.
    SetLabel(String),
    /// Enable or disable the recognition controls.
    SetControlsEnabled(bool),
    /// A transient notification. Never touches the label.
    Notice(String),
}

/// Clonable posting half of the UI channel.
///
/// Safe to call from any task; the update is queued and applied by the
/// owning loop in the order it arrived.
#[derive(Debug, Clone)]
pub struct UiHandle {
    tx: mpsc::UnboundedSender<UiUpdate>,
}

impl UiHandle {
    /// Queue one update for the UI loop.
    pub fn post(&self, update: UiUpdate) {
        if self.tx.send(update).is_err() {
            warn!("UI loop has shut down; dropping update");
        }
    }

    pub fn set_label(&self, text: impl Into<String>) {
        self.post(UiUpdate::SetLabel(text.into()));
    }

    pub fn set_controls_enabled(&self, enabled: bool) {
        self.post(UiUpdate::SetControlsEnabled(enabled));
    }

    pub fn notice(&self, text: impl Into<String>) {
        self.post(UiUpdate::Notice(text.into()));
    }
}

/// Displayed state: one status label plus an enabled flag for the controls.
///
/// Starts with an empty label and disabled controls; nothing is enabled
/// until the permission gate settles.
#[derive(Debug, Clone, Default)]
pub struct UiSurface {
    label: String,
    controls_enabled: bool,
    last_notice: Option<String>,
}

impl UiSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn last_notice(&self) -> Option<&str> {
        self.last_notice.as_deref()
    }

    /// Apply one update to the surface.
    pub fn apply(&mut self, update: &UiUpdate) {
        match update {
            UiUpdate::SetLabel(text) => self.label = text.clone(),
            UiUpdate::SetControlsEnabled(enabled) => self.controls_enabled = *enabled,
            UiUpdate::Notice(text) => self.last_notice = Some(text.clone()),
        }
    }
}

/// Receiving half of the UI channel together with the surface it mutates.
pub struct UiLoop {
    rx: mpsc::UnboundedReceiver<UiUpdate>,
    surface: UiSurface,
}

impl UiLoop {
    /// Create the loop and its posting handle.
    pub fn new() -> (Self, UiHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ui_loop = Self {
            rx,
            surface: UiSurface::new(),
        };
        (ui_loop, UiHandle { tx })
    }

    pub fn surface(&self) -> &UiSurface {
        &self.surface
    }

    /// Wait for the next update and apply it.
    ///
    /// Returns the update that was applied, or `None` once every handle has
    /// been dropped. Cancel safe: an update is either received and applied
    /// or still queued.
    pub async fn step(&mut self) -> Option<UiUpdate> {
        let update = self.rx.recv().await?;
        self.surface.apply(&update);
        Some(update)
    }

    /// Apply every update already queued, without waiting for more.
    ///
    /// Returns the applied updates in arrival order.
    pub fn drain_pending(&mut self) -> Vec<UiUpdate> {
        let mut applied = Vec::new();
        while let Ok(update) = self.rx.try_recv() {
            self.surface.apply(&update);
            applied.push(update);
        }
        applied
    }
}
