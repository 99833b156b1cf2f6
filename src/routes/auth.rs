//! Auth routes: login, registration, logout.

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::api::{ApiError, Credentials};
use crate::services::auth::{self as auth_svc, AuthFlowError, AuthMode};
use crate::services::guard::{LOGIN_PATH, PANEL_PATH};
use crate::services::session::ClearReason;
use crate::state::AppState;
use crate::views;

#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// `GET /login`
pub async fn login_form() -> Html<String> {
    views::auth_page(AuthMode::Login, None)
}

/// `GET /register`
pub async fn register_form() -> Html<String> {
    views::auth_page(AuthMode::Register, None)
}

/// `POST /login`: exchange credentials for a session cookie and open the panel.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Form(form): Form<CredentialsForm>) -> Response {
    submit(&state, jar, AuthMode::Login, form).await
}

/// `POST /register`: create the account, then behave like login.
pub async fn register(State(state): State<AppState>, jar: CookieJar, Form(form): Form<CredentialsForm>) -> Response {
    submit(&state, jar, AuthMode::Register, form).await
}

async fn submit(state: &AppState, jar: CookieJar, mode: AuthMode, form: CredentialsForm) -> Response {
    let credentials = Credentials { username: form.username, password: form.password };

    match auth_svc::authenticate(state.api.as_ref(), mode, &credentials).await {
        Ok(session) => {
            let jar = state.sessions.establish(jar, &session);
            (jar, Redirect::to(PANEL_PATH)).into_response()
        }
        Err(err) => {
            let page = views::auth_page(mode, Some(err.user_message().to_owned()));
            (auth_error_status(&err), page).into_response()
        }
    }
}

pub(crate) fn auth_error_status(err: &AuthFlowError) -> StatusCode {
    match err {
        AuthFlowError::MissingCredentials => StatusCode::UNPROCESSABLE_ENTITY,
        AuthFlowError::Backend(e) if e.is_unauthorized() => StatusCode::UNAUTHORIZED,
        AuthFlowError::Backend(ApiError::Status { status: 400..=499, .. }) => StatusCode::BAD_REQUEST,
        AuthFlowError::Backend(_) | AuthFlowError::Token(_) => StatusCode::BAD_GATEWAY,
    }
}

/// `POST /logout`: drop the cookie and return to the login form.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = state.sessions.clear(jar, ClearReason::Logout);
    (jar, Redirect::to(LOGIN_PATH))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
