//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route sits behind the session guard middleware, which decides
//! allow / redirect before a handler runs. Pages are rendered on the server;
//! mutations are form posts that redirect back to `/panel` once the backend
//! write completes, so the next GET re-fetches fresh data.

pub mod auth;
pub mod guard;
pub mod panel;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::Redirect;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::services::guard::PANEL_PATH;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let timeouts = state.config.timeouts;
    // A panel render makes two rounds of backend calls.
    let page_timeout =
        Duration::from_secs(timeouts.request_secs.saturating_mul(2).saturating_add(timeouts.connect_secs));

    Router::new()
        .route("/", get(redirect_root))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/panel", get(panel::show))
        .route("/panel/games", post(panel::create_game))
        .route("/panel/games/{id}/comments", post(panel::post_comment))
        .route("/panel/games/{id}/scores", post(panel::post_score))
        .route("/healthz", get(healthz))
        .layer(middleware::from_fn_with_state(state.clone(), guard::enforce))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, page_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn redirect_root() -> Redirect {
    Redirect::to(PANEL_PATH)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
