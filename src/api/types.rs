//! Backend wire types, validated request bodies, and the client error.
//!
//! Request bodies are only constructible through their validating
//! constructors, so a handler that holds a `NewGame`, `CommentText` or
//! `Score` has already passed the non-empty / range checks and may issue the
//! write.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by backend client operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("API request failed: {0}")]
    Request(String),

    /// The backend returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    Decode(String),

    /// The configured base URL cannot be used to build request URLs.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// True when the backend rejected the bearer token or credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

// =============================================================================
// READ MODELS
// =============================================================================

/// A comment attached to a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "comment")]
    pub text: String,
    pub author: String,
}

/// A user-created game entry as listed by `GET /games`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameBundle {
    pub id: String,
    #[serde(rename = "authorAccountId")]
    pub author_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Server-derived score summary for one game.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreAggregate {
    pub average: f64,
    pub count: u64,
}

/// Login and registration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtResponse {
    pub jwt: String,
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Username/password pair for `POST /accounts` and `POST /accounts/jwt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Both fields must be non-empty before any request is issued.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Body of `POST /games`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewGame {
    title: String,
    description: String,
}

impl NewGame {
    /// Returns `None` if either field is blank.
    #[must_use]
    pub fn new(title: &str, description: &str) -> Option<Self> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            return None;
        }
        Some(Self { title: title.to_owned(), description: description.to_owned() })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Body of `POST /games/{id}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentText {
    comment: String,
}

impl CommentText {
    /// Returns `None` for blank input.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let comment = raw.trim();
        if comment.is_empty() {
            return None;
        }
        Some(Self { comment: comment.to_owned() })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.comment
    }
}

/// A score in `1..=5`, serialized as the body of `POST /games/{id}/scores`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    score: u8,
}

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Returns `None` outside `1..=5`.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&value)
            .then_some(Self { score: value })
    }

    /// Parse a form value such as `"4"`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u8>().ok().and_then(Self::new)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.score
    }

    /// Every valid score, lowest first.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(|score| Self { score })
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
