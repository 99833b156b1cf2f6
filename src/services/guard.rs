//! Route-guard policy.
//!
//! A pure function of (path, has active session). The axum middleware in
//! `routes::guard` applies it before any handler runs, so a protected page is
//! never rendered for a visitor without a live session.

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const PANEL_PATH: &str = "/panel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Requires an active session.
    Protected,
    /// Only for visitors without a session (login / register).
    AuthOnly,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToPanel,
}

/// Classify a request path. Trailing slashes are ignored.
#[must_use]
pub fn classify(path: &str) -> PathClass {
    let trimmed = path.trim_end_matches('/');
    if trimmed == PANEL_PATH || trimmed.starts_with("/panel/") {
        PathClass::Protected
    } else if trimmed == LOGIN_PATH || trimmed == REGISTER_PATH {
        PathClass::AuthOnly
    } else {
        PathClass::Public
    }
}

#[must_use]
pub fn decide(path: &str, has_session: bool) -> GuardDecision {
    match (classify(path), has_session) {
        (PathClass::Protected, false) => GuardDecision::RedirectToLogin,
        (PathClass::AuthOnly, true) => GuardDecision::RedirectToPanel,
        _ => GuardDecision::Allow,
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
