//! Panel routes: the game list page and its three form posts.
//!
//! Every write redirects back to `/panel` with a notice, so the follow-up GET
//! re-fetches the data the write touched.

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::guard::ActiveSession;
use crate::api::{ApiError, CommentText, NewGame, Score};
use crate::services::fetch;
use crate::services::guard::{LOGIN_PATH, PANEL_PATH};
use crate::services::session::ClearReason;
use crate::state::AppState;
use crate::views;
use crate::views::game::anchor_id;

// =============================================================================
// NOTICES
// =============================================================================

/// Status line shown above the game list after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    GameCreated,
    CommentPosted,
    ScoreRecorded,
    MissingFields,
    InvalidScore,
    BackendError,
}

impl Notice {
    const ALL: [Self; 6] = [
        Self::GameCreated,
        Self::CommentPosted,
        Self::ScoreRecorded,
        Self::MissingFields,
        Self::InvalidScore,
        Self::BackendError,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GameCreated => "game-created",
            Self::CommentPosted => "comment-posted",
            Self::ScoreRecorded => "score-recorded",
            Self::MissingFields => "missing-fields",
            Self::InvalidScore => "invalid-score",
            Self::BackendError => "backend-error",
        }
    }

    /// Unknown values are ignored rather than echoed into the page.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.as_str() == raw)
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::GameCreated => "Game added.",
            Self::CommentPosted => "Comment posted.",
            Self::ScoreRecorded => "Score recorded.",
            Self::MissingFields => "Fill in every field before submitting.",
            Self::InvalidScore => "Scores run from 1 to 5.",
            Self::BackendError => "The games service did not accept that. Try again.",
        }
    }
}

/// Only ids made of `[A-Za-z0-9_-]` get a redirect anchor.
fn anchor_safe(game_id: &str) -> bool {
    !game_id.is_empty() && game_id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn panel_redirect(notice: Notice, game_id: Option<&str>) -> Redirect {
    let fragment = game_id
        .filter(|id| anchor_safe(id))
        .map(|id| format!("#{}", anchor_id(id)))
        .unwrap_or_default();
    Redirect::to(&format!("{PANEL_PATH}?notice={}{fragment}", notice.as_str()))
}

// =============================================================================
// PAGE
// =============================================================================

#[derive(Deserialize)]
pub struct PanelQuery {
    notice: Option<String>,
}

/// `GET /panel`
pub async fn show(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
    Query(query): Query<PanelQuery>,
) -> Html<String> {
    let cards = fetch::load_panel(state.api.as_ref(), &session.token).await;
    let notice = query.notice.as_deref().and_then(Notice::parse).map(|n| n.message().to_owned());
    views::panel_page(cards, notice)
}

// =============================================================================
// WRITES
// =============================================================================

#[derive(Deserialize)]
pub struct NewGameForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    comment: String,
}

#[derive(Deserialize)]
pub struct ScoreForm {
    #[serde(default)]
    score: String,
}

/// `POST /panel/games`
pub async fn create_game(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
    jar: CookieJar,
    Form(form): Form<NewGameForm>,
) -> Response {
    let Some(game) = NewGame::new(&form.title, &form.description) else {
        return panel_redirect(Notice::MissingFields, None).into_response();
    };

    let result = state.api.create_game(&session.token, &game).await;
    finish_write(&state, jar, result, "create_game", None, Notice::GameCreated)
}

/// `POST /panel/games/{id}/comments`
pub async fn post_comment(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
    Path(game_id): Path<String>,
    jar: CookieJar,
    Form(form): Form<CommentForm>,
) -> Response {
    let Some(comment) = CommentText::new(&form.comment) else {
        return panel_redirect(Notice::MissingFields, Some(&game_id)).into_response();
    };

    let result = state.api.post_comment(&session.token, &game_id, &comment).await;
    finish_write(&state, jar, result, "post_comment", Some(&game_id), Notice::CommentPosted)
}

/// `POST /panel/games/{id}/scores`
pub async fn post_score(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
    Path(game_id): Path<String>,
    jar: CookieJar,
    Form(form): Form<ScoreForm>,
) -> Response {
    let Some(score) = Score::parse(&form.score) else {
        return panel_redirect(Notice::InvalidScore, Some(&game_id)).into_response();
    };

    let result = state.api.post_score(&session.token, &game_id, score).await;
    finish_write(&state, jar, result, "post_score", Some(&game_id), Notice::ScoreRecorded)
}

/// Shared tail of every write: redirect with a notice, or drop a session
/// the backend no longer accepts.
fn finish_write(
    state: &AppState,
    jar: CookieJar,
    result: Result<(), ApiError>,
    operation: &'static str,
    game_id: Option<&str>,
    success: Notice,
) -> Response {
    match result {
        Ok(()) => panel_redirect(success, game_id).into_response(),
        Err(e) if e.is_unauthorized() => {
            tracing::warn!(operation, "backend rejected session token");
            let jar = state.sessions.clear(jar, ClearReason::Rejected);
            (jar, Redirect::to(LOGIN_PATH)).into_response()
        }
        Err(e) => {
            tracing::warn!(operation, game_id, error = %e, "backend write failed");
            panel_redirect(Notice::BackendError, game_id).into_response()
        }
    }
}

#[cfg(test)]
#[path = "panel_test.rs"]
mod tests;
