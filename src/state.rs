//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and middleware via the `State`
//! extractor. It is immutable after startup: the backend client, the session
//! store, and the parsed config. Per-user state lives only in the session
//! cookie.

use std::sync::Arc;

use crate::api::GameApi;
use crate::config::Config;
use crate::services::session::{SessionEvents, SessionStore};

/// Shared application state. Clone is required by Axum; all fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: Arc<dyn GameApi>,
    pub sessions: SessionStore,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, api: Arc<dyn GameApi>, events: Arc<dyn SessionEvents>) -> Self {
        let sessions = SessionStore::new(config.cookie_secure, events);
        Self { config: Arc::new(config), api, sessions }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
