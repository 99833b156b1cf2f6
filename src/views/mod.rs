//! Server-rendered pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages are Leptos components rendered to HTML strings inside axum
//! handlers; no client bundle is shipped. Every interaction is a plain HTML
//! form, so Enter inside a text input submits that form and nothing else,
//! and the `✕` reset buttons clear their own form's inputs.
//!
//! Text that mixes a label with a value is formatted into a single string
//! before it reaches `view!`, so each paragraph renders as one text node.

pub mod auth;
pub mod game;
pub mod panel;

use axum::response::Html;
use leptos::prelude::*;

use self::auth::AuthPage;
use self::panel::PanelPage;
use crate::services::auth::AuthMode;
use crate::services::fetch::GameCardData;

const STYLE: &str = "
body { font-family: system-ui, sans-serif; margin: 0; background: #f4f4f6; color: #222; }
main { max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
form { margin: 1rem 0; }
.label { margin: 0.5rem 0 0.25rem; font-weight: 600; }
.input-frame { display: flex; gap: 0.25rem; }
.form-input { flex: 1; padding: 0.4rem; }
.clear { border: none; background: none; cursor: pointer; }
.submit-button, .logout-button, .score-button { padding: 0.4rem 0.8rem; cursor: pointer; }
.notice, .error { padding: 0.5rem; border-radius: 4px; background: #fff3cd; }
.error { background: #f8d7da; }
.game { background: #fff; border-radius: 6px; padding: 1rem; margin: 1rem 0; }
.scores { display: flex; gap: 0.25rem; }
.comments-header { font-weight: 600; }
.comment { border-top: 1px solid #ddd; }
";

/// Wrap a page body in the document shell and render it.
pub fn render_document(title: &str, body: impl IntoView) -> Html<String> {
    let title = format!("{title} | Game Panel");
    let html = view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title}</title>
                <style>{STYLE}</style>
            </head>
            <body>{body}</body>
        </html>
    }
    .to_html();
    Html(html)
}

/// Login or registration form, optionally with an error banner.
pub fn auth_page(mode: AuthMode, error: Option<String>) -> Html<String> {
    render_document(mode.title(), view! { <AuthPage mode=mode error=error/> })
}

/// The protected panel: create-game form plus one card per game.
pub fn panel_page(cards: Vec<GameCardData>, notice: Option<String>) -> Html<String> {
    render_document("Panel", view! { <PanelPage cards=cards notice=notice/> })
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
