//! Session guard middleware and the `ActiveSession` extractor.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::services::guard::{self, GuardDecision, LOGIN_PATH, PANEL_PATH};
use crate::services::session::{Session, SessionLookup};
use crate::state::AppState;

/// Read the session cookie once, apply the guard policy, and either
/// redirect or pass the request on with the session in its extensions.
pub async fn enforce(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let lookup = state.sessions.get(&jar);

    match guard::decide(request.uri().path(), lookup.is_active()) {
        GuardDecision::RedirectToLogin => {
            tracing::debug!(path = %request.uri().path(), "no active session; redirecting to login");
            let jar = match lookup.stale_reason() {
                Some(reason) => state.sessions.clear(jar, reason),
                None => jar,
            };
            (jar, Redirect::to(LOGIN_PATH)).into_response()
        }
        GuardDecision::RedirectToPanel => Redirect::to(PANEL_PATH).into_response(),
        GuardDecision::Allow => {
            if let SessionLookup::Active(session) = lookup {
                request.extensions_mut().insert(session);
            }
            next.run(request).await
        }
    }
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// The session the guard validated for this request.
/// Use as a handler parameter on protected routes.
pub struct ActiveSession(pub Session);

impl<S> FromRequestParts<S> for ActiveSession
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}
