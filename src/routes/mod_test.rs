use std::sync::Arc;

use axum::http::StatusCode;
use time::OffsetDateTime;

use super::*;
use crate::config::{ApiTimeouts, Config};
use crate::services::session::ClearReason;
use crate::state::test_helpers::{
    MockApi, MockBackend, RecordingEvents, clears_session, form_request, get_request, live_token, location,
    mint_token, send, session_cookie, test_app_state,
};

fn test_app() -> (Router, Arc<MockApi>, Arc<RecordingEvents>) {
    let api = Arc::new(MockApi::new(MockBackend::default()));
    let (state, events) = test_app_state(api.clone());
    (app(state), api, events)
}

#[tokio::test]
async fn root_redirects_to_panel() {
    let (app, _, _) = test_app();
    let cookie = session_cookie(&live_token());

    let response = send(app, get_request("/", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/panel");
}

#[tokio::test]
async fn root_without_session_lands_on_login_via_panel() {
    let (app, _, _) = test_app();

    let response = send(app.clone(), get_request("/", None)).await;
    assert_eq!(location(&response), "/panel");

    let response = send(app, get_request("/panel", None)).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn healthz_is_public() {
    let (app, _, _) = test_app();

    let response = send(app.clone(), get_request("/healthz", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = session_cookie(&live_token());
    let response = send(app, get_request("/healthz", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// guard
// =============================================================================

#[tokio::test]
async fn protected_paths_redirect_to_login_without_session() {
    let (app, api, _) = test_app();

    let response = send(app.clone(), get_request("/panel", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    for uri in ["/panel/games", "/panel/games/g-1/comments", "/panel/games/g-1/scores"] {
        let response = send(app.clone(), form_request(uri, "", None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }
    assert!(api.calls().is_empty(), "no backend call before the guard allows");
}

#[tokio::test]
async fn auth_pages_redirect_to_panel_with_session() {
    let (app, _, _) = test_app();
    let cookie = session_cookie(&live_token());

    for uri in ["/login", "/register"] {
        let response = send(app.clone(), get_request(uri, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/panel", "{uri}");
    }
}

#[tokio::test]
async fn auth_pages_render_without_session() {
    let (app, _, _) = test_app();

    for uri in ["/login", "/register"] {
        let response = send(app.clone(), get_request(uri, None)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn expired_cookie_is_cleared_on_redirect() {
    let (app, api, events) = test_app();
    let expired = mint_token(OffsetDateTime::now_utc().unix_timestamp() - 60);
    let cookie = session_cookie(&expired);

    let response = send(app, get_request("/panel", Some(&cookie))).await;

    assert_eq!(location(&response), "/login");
    assert!(clears_session(&response));
    assert_eq!(events.cleared_reasons(), vec![ClearReason::Expired]);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn garbage_cookie_is_cleared_on_redirect() {
    let (app, _, events) = test_app();

    let response = send(app, get_request("/panel", Some("session=not-json"))).await;

    assert_eq!(location(&response), "/login");
    assert!(clears_session(&response));
    assert_eq!(events.cleared_reasons(), vec![ClearReason::Invalid]);
}

#[tokio::test]
async fn expired_cookie_still_reaches_login_form() {
    let (app, _, events) = test_app();
    let expired = mint_token(OffsetDateTime::now_utc().unix_timestamp() - 60);
    let cookie = session_cookie(&expired);

    let response = send(app, get_request("/login", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(events.cleared_reasons().is_empty());
}

#[tokio::test]
async fn huge_timeouts_do_not_overflow_page_timeout() {
    let api = Arc::new(MockApi::new(MockBackend::default()));
    let config = Config {
        timeouts: ApiTimeouts { request_secs: u64::MAX, connect_secs: u64::MAX },
        ..Config::default()
    };
    let state = AppState::new(config, api, Arc::new(RecordingEvents::default()));

    let response = send(app(state), get_request("/healthz", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
}
