//! Shared Application State
//!
//! This module defines the `AppState` struct holding the one session this
//! service serves. The simulator is a single-user demo: one session per
//! process, guarded by a mutex so submissions are strictly sequential and
//! there is never a concurrent in-flight backend call for the session.

use tokio::sync::Mutex;
use vosce_core::session::SessionController;

/// The shared application state, created once at startup and passed to all
/// handlers.
pub struct AppState {
    pub controller: Mutex<SessionController>,
}

impl AppState {
    pub fn new(controller: SessionController) -> Self {
        Self {
            controller: Mutex::new(controller),
        }
    }
}
