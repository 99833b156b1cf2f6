//! Session cookie lifecycle.
//!
//! ARCHITECTURE
//! ============
//! The `session` cookie is the only place a session lives. Its value is the
//! JSON object `{"jwt": "..."}` and it expires when the token does. The guard
//! middleware reads it once per request through [`SessionStore::get`] and
//! hands the result to handlers via request extensions; handlers never parse
//! the cookie themselves.
//!
//! Establishing or clearing a session goes through [`SessionStore`], which
//! reports each transition to an injected [`SessionEvents`] sink.
//!
//! TRADE-OFFS
//! ==========
//! Token expiry is read from the `exp` claim without verifying the
//! signature. The backend owns the signing key and re-validates the bearer
//! token on every call; the panel only needs the expiry to size the cookie
//! and to stop rendering protected pages for dead tokens.

use std::collections::HashSet;
use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use time::{Duration, OffsetDateTime};

pub const COOKIE_NAME: &str = "session";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session cookie is not valid JSON: {0}")]
    MalformedCookie(String),
    #[error("session token could not be decoded: {0}")]
    MalformedToken(String),
    #[error("session token has no expiry claim")]
    MissingExpiry,
    #[error("session token expiry {0} is out of range")]
    InvalidExpiry(i64),
    #[error("session token is already expired")]
    Expired,
}

// =============================================================================
// SESSION
// =============================================================================

/// An authenticated session: the backend bearer token and when it dies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub expiry: OffsetDateTime,
}

impl Session {
    /// Build a session from a raw JWT, taking the expiry from its `exp` claim.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be decoded or carries no usable `exp`.
    pub fn from_token(token: String) -> Result<Self, SessionError> {
        let expiry = token_expiry(&token)?;
        Ok(Self { token, expiry })
    }

    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expiry
    }
}

#[derive(Deserialize)]
struct CookiePayload {
    jwt: String,
}

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: Option<i64>,
}

/// Serialize a token into the cookie value format.
#[must_use]
pub fn encode_cookie_value(token: &str) -> String {
    serde_json::json!({ "jwt": token }).to_string()
}

/// Extract the token from a cookie value.
///
/// # Errors
///
/// Returns [`SessionError::MalformedCookie`] if the value is not `{"jwt": "..."}`.
pub fn decode_cookie_value(raw: &str) -> Result<String, SessionError> {
    serde_json::from_str::<CookiePayload>(raw)
        .map(|payload| payload.jwt)
        .map_err(|e| SessionError::MalformedCookie(e.to_string()))
}

/// Read the `exp` claim of a JWT without checking its signature.
///
/// # Errors
///
/// Returns an error if the token is not a JWT or has no integer `exp`.
pub fn token_expiry(token: &str) -> Result<OffsetDateTime, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    // Claims deserialize before required claims are checked, so `exp` is
    // enforced here instead.
    validation.required_spec_claims = HashSet::new();

    let data = jsonwebtoken::decode::<ExpiryClaim>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| SessionError::MalformedToken(e.to_string()))?;
    let exp = data.claims.exp.ok_or(SessionError::MissingExpiry)?;
    OffsetDateTime::from_unix_timestamp(exp).map_err(|_| SessionError::InvalidExpiry(exp))
}

// =============================================================================
// LOOKUP
// =============================================================================

/// Outcome of reading the session cookie for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    Active(Session),
    /// Cookie present, token past its `exp`.
    Expired,
    /// Cookie present but unparsable.
    Invalid,
    Absent,
}

impl SessionLookup {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Why a present-but-unusable cookie should be deleted, if it should.
    #[must_use]
    pub fn stale_reason(&self) -> Option<ClearReason> {
        match self {
            Self::Expired => Some(ClearReason::Expired),
            Self::Invalid => Some(ClearReason::Invalid),
            Self::Active(_) | Self::Absent => None,
        }
    }
}

/// Read the session cookie as of `now`.
#[must_use]
pub fn lookup_at(jar: &CookieJar, now: OffsetDateTime) -> SessionLookup {
    let Some(cookie) = jar.get(COOKIE_NAME) else {
        return SessionLookup::Absent;
    };
    if cookie.value().is_empty() {
        return SessionLookup::Absent;
    }

    match decode_cookie_value(cookie.value()).and_then(Session::from_token) {
        Ok(session) if session.is_expired_at(now) => SessionLookup::Expired,
        Ok(session) => SessionLookup::Active(session),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unusable session cookie");
            SessionLookup::Invalid
        }
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// Why a session was torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearReason {
    Logout,
    Expired,
    Invalid,
    /// The backend answered `401` to the session's token.
    Rejected,
}

impl ClearReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Logout => "logout",
            Self::Expired => "expired",
            Self::Invalid => "invalid",
            Self::Rejected => "rejected",
        }
    }
}

/// Receives session transitions. Implementations must be cheap; they run
/// inline in the request.
pub trait SessionEvents: Send + Sync {
    fn established(&self, session: &Session);
    fn cleared(&self, reason: ClearReason);
}

/// Default sink: structured log lines.
pub struct TracingSessionEvents;

impl SessionEvents for TracingSessionEvents {
    fn established(&self, session: &Session) {
        tracing::info!(expires_at = %session.expiry, "session established");
    }

    fn cleared(&self, reason: ClearReason) {
        tracing::info!(reason = reason.as_str(), "session cleared");
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Reads and writes the session cookie.
#[derive(Clone)]
pub struct SessionStore {
    secure: bool,
    events: Arc<dyn SessionEvents>,
}

impl SessionStore {
    #[must_use]
    pub fn new(secure: bool, events: Arc<dyn SessionEvents>) -> Self {
        Self { secure, events }
    }

    /// Current session state of the request that produced `jar`.
    #[must_use]
    pub fn get(&self, jar: &CookieJar) -> SessionLookup {
        lookup_at(jar, OffsetDateTime::now_utc())
    }

    /// Write the session cookie, expiring with the token.
    #[must_use]
    pub fn establish(&self, jar: CookieJar, session: &Session) -> CookieJar {
        let cookie = Cookie::build((COOKIE_NAME, encode_cookie_value(&session.token)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .expires(session.expiry);
        self.events.established(session);
        jar.add(cookie)
    }

    /// Overwrite the session cookie with an already-expired empty one.
    #[must_use]
    pub fn clear(&self, jar: CookieJar, reason: ClearReason) -> CookieJar {
        let cookie = Cookie::build((COOKIE_NAME, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(Duration::ZERO);
        self.events.cleared(reason);
        jar.add(cookie)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
