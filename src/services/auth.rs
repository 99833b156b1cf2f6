//! Login and registration against the games backend.

use time::OffsetDateTime;

use crate::api::{ApiError, Credentials, GameApi};
use crate::services::guard::{LOGIN_PATH, REGISTER_PATH};
use crate::services::session::{Session, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    /// Form path for this mode.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Register => REGISTER_PATH,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Log in",
            Self::Register => "Create account",
        }
    }

    /// The other mode, for the "switch form" link.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    #[error("username and password are required")]
    MissingCredentials,
    #[error("authentication request failed: {0}")]
    Backend(#[from] ApiError),
    #[error("backend issued an unusable token: {0}")]
    Token(#[from] SessionError),
}

impl AuthFlowError {
    /// Message shown above the form.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "Username and password are required.",
            Self::Backend(e) if e.is_unauthorized() => "Invalid username or password.",
            Self::Backend(ApiError::Status { status: 400..=499, .. }) => "The request was rejected. Check your details and try again.",
            Self::Backend(_) | Self::Token(_) => "The games service is unavailable. Try again later.",
        }
    }
}

/// Exchange credentials for a session. Nothing is sent when a field is empty.
///
/// # Errors
///
/// Returns an error for missing credentials, a failed backend call, or a
/// token without a future expiry. Backend and token failures are logged here.
pub async fn authenticate(
    api: &dyn GameApi,
    mode: AuthMode,
    credentials: &Credentials,
) -> Result<Session, AuthFlowError> {
    if !credentials.is_complete() {
        return Err(AuthFlowError::MissingCredentials);
    }

    let response = match mode {
        AuthMode::Login => api.login(credentials).await,
        AuthMode::Register => api.register(credentials).await,
    }
    .inspect_err(|e| tracing::error!(error = %e, mode = mode.as_str(), "authentication request failed"))?;

    let session = Session::from_token(response.jwt)
        .inspect_err(|e| tracing::error!(error = %e, mode = mode.as_str(), "backend token rejected"))?;
    if session.is_expired_at(OffsetDateTime::now_utc()) {
        tracing::error!(mode = mode.as_str(), expiry = %session.expiry, "backend issued an expired token");
        return Err(SessionError::Expired.into());
    }

    tracing::info!(username = %credentials.username, mode = mode.as_str(), "authenticated");
    Ok(session)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
