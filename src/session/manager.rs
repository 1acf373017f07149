use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::stats::{SessionPhase, SessionStats};
use crate::recognition::{render_event, ListenConfig, SpeechBackend};
use crate::ui::UiHandle;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The permission gate never granted, so no recognizer handle exists.
    #[error("recognition session is not initialized")]
    NotInitialized,
    /// The recognizer handle was already released.
    #[error("recognition session was shut down")]
    ShutDown,
    /// The backend refused to start listening.
    #[error("recognizer backend error: {0}")]
    Backend(anyhow::Error),
}

/// One acquired recognizer handle plus the pump task that forwards its
/// events to the UI.
pub struct RecognitionSession {
    backend: Mutex<Box<dyn SpeechBackend>>,
    ui: UiHandle,
    listening: Arc<AtomicBool>,
    started_at: Mutex<Option<DateTime<Utc>>>,
    events_seen: Arc<AtomicUsize>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl RecognitionSession {
    pub fn new(backend: Box<dyn SpeechBackend>, ui: UiHandle) -> Self {
        Self {
            backend: Mutex::new(backend),
            ui,
            listening: Arc::new(AtomicBool::new(false)),
            started_at: Mutex::new(None),
            events_seen: Arc::new(AtomicUsize::new(0)),
            pump: Mutex::new(None),
        }
    }

    /// Begin a streaming listening attempt.
    ///
    /// The session adds no busy-guard of its own: whether a second start is
    /// tolerated is the backend's decision, and a rejection is propagated
    /// without touching the UI. Once the backend accepts, any pump left
    /// from a finished attempt is joined before the new one is wired up.
    pub async fn start(&self, config: &ListenConfig) -> Result<(), SessionError> {
        let mut backend = self.backend.lock().await;
        let mut events = backend
            .start_listening(config)
            .await
            .map_err(SessionError::Backend)?;
        info!(backend = backend.name(), "listening attempt started");
        drop(backend);

        // The backend accepts a start only after the previous stream has
        // closed, so any leftover pump is already terminating. Join it
        // before setting the shared flags it would otherwise clear on exit.
        self.wait_idle().await;

        *self.started_at.lock().await = Some(Utc::now());
        self.listening.store(true, Ordering::SeqCst);

        let ui = self.ui.clone();
        let listening = Arc::clone(&self.listening);
        let events_seen = Arc::clone(&self.events_seen);
        let pump = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                debug!(?event, "recognizer event");
                events_seen.fetch_add(1, Ordering::SeqCst);
                if let Some(label) = render_event(&event) {
                    ui.set_label(label);
                }
            }
            listening.store(false, Ordering::SeqCst);
            debug!("recognizer event stream ended");
        });
        *self.pump.lock().await = Some(pump);

        Ok(())
    }

    /// Stop the current listening attempt.
    ///
    /// Safe to call when idle; the backend treats that as a no-op and no
    /// events are synthesized. Waits for the event pump to drain before
    /// returning.
    pub async fn stop(&self) {
        let mut backend = self.backend.lock().await;
        if let Err(e) = backend.stop_listening().await {
            warn!("failed to stop recognizer backend: {e:#}");
        }
        drop(backend);
        self.wait_idle().await;
    }

    /// Wait for the in-flight listening attempt, if any, to finish.
    pub async fn wait_idle(&self) {
        let pump = self.pump.lock().await.take();
        if let Some(pump) = pump {
            if let Err(e) = pump.await {
                error!("recognizer event pump failed: {e}");
            }
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    pub async fn started_at(&self) -> Option<DateTime<Utc>> {
        *self.started_at.lock().await
    }

    pub fn events_seen(&self) -> usize {
        self.events_seen.load(Ordering::SeqCst)
    }

    /// Release the recognizer handle: stop listening, drain the pump, and
    /// let the backend drop with the session.
    pub async fn close(self) {
        self.stop().await;
        info!("recognizer handle released");
    }
}

impl Drop for RecognitionSession {
    fn drop(&mut self) {
        // Backstop for sessions dropped without `close`; the pump must not
        // outlive the UI it posts to.
        if let Ok(mut pump) = self.pump.try_lock() {
            if let Some(pump) = pump.take() {
                pump.abort();
                warn!("recognition session dropped with a live event pump; aborting it");
            }
        }
    }
}

/// Owns the session for the lifetime of the hosting screen.
///
/// `initialize` is idempotent, so a permission gate that fires more than
/// once still produces exactly one live recognizer handle. `shutdown`
/// releases the handle exactly once; afterwards the manager refuses to
/// start anything new.
pub struct SessionManager {
    ui: UiHandle,
    session: Option<RecognitionSession>,
    shut_down: bool,
}

impl SessionManager {
    pub fn new(ui: UiHandle) -> Self {
        Self {
            ui,
            session: None,
            shut_down: false,
        }
    }

    /// Acquire the recognizer handle if none exists yet.
    ///
    /// Returns whether a new session was created. The factory closure is
    /// not invoked when a handle is already live or the manager was shut
    /// down.
    pub fn initialize<F>(&mut self, make_backend: F) -> bool
    where
        F: FnOnce() -> Box<dyn SpeechBackend>,
    {
        if self.shut_down {
            warn!("ignoring initialize after shutdown");
            return false;
        }
        if self.session.is_some() {
            debug!("recognition session already initialized; keeping the existing handle");
            return false;
        }

        let backend = make_backend();
        info!(backend = backend.name(), "recognition session initialized");
        self.session = Some(RecognitionSession::new(backend, self.ui.clone()));
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.shut_down {
            return SessionPhase::Stopped;
        }
        match &self.session {
            None => SessionPhase::Uninitialized,
            Some(session) if session.is_listening() => SessionPhase::Listening,
            Some(_) => SessionPhase::Active,
        }
    }

    /// Begin a streaming listening attempt on the owned session.
    pub async fn start(&self, config: &ListenConfig) -> Result<(), SessionError> {
        match &self.session {
            Some(session) => session.start(config).await,
            None if self.shut_down => Err(SessionError::ShutDown),
            None => Err(SessionError::NotInitialized),
        }
    }

    /// Stop the current listening attempt. A no-op when nothing is live,
    /// including before initialization.
    pub async fn stop(&self) {
        if let Some(session) = &self.session {
            session.stop().await;
        }
    }

    /// Wait for the in-flight listening attempt, if any, to finish.
    pub async fn wait_idle(&self) {
        if let Some(session) = &self.session {
            session.wait_idle().await;
        }
    }

    pub async fn stats(&self) -> SessionStats {
        let (started_at, events_seen) = match &self.session {
            Some(session) => (session.started_at().await, session.events_seen()),
            None => (None, 0),
        };
        SessionStats {
            phase: self.phase(),
            started_at,
            events_seen,
        }
    }

    /// Release the recognizer handle. Idempotent; later calls are no-ops.
    pub async fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            session.close().await;
        }
        if !self.shut_down {
            self.shut_down = true;
            info!("session manager shut down");
        }
    }
}
