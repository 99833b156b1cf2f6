//! `reqwest` implementation of [`GameApi`].

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::GameApi;
use super::types::{ApiError, Comment, CommentText, Credentials, GameBundle, JwtResponse, NewGame, Score, ScoreAggregate};
use crate::config::ApiTimeouts;

pub struct HttpGameApi {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpGameApi {
    /// Build a client rooted at `base_url` (e.g. `http://localhost:3001`).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot carry a path or the HTTP client
    /// fails to build.
    pub fn new(base_url: &str, timeouts: ApiTimeouts) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.endpoint(segments));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str], token: &str) -> Result<T, ApiError> {
        let response = send(self.request(Method::GET, segments, Some(token))).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post<B: Serialize + Sync>(
        &self,
        segments: &[&str],
        token: Option<&str>,
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        send(self.request(Method::POST, segments, token).json(body)).await
    }
}

/// Send the request and turn non-success statuses into [`ApiError::Status`].
async fn send(builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
    let response = builder.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status: status.as_u16(), body })
}

#[async_trait::async_trait]
impl GameApi for HttpGameApi {
    async fn register(&self, credentials: &Credentials) -> Result<JwtResponse, ApiError> {
        let response = self.post(&["accounts"], None, credentials).await?;
        response.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn login(&self, credentials: &Credentials) -> Result<JwtResponse, ApiError> {
        let response = self.post(&["accounts", "jwt"], None, credentials).await?;
        response.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn list_games(&self, token: &str) -> Result<Vec<GameBundle>, ApiError> {
        self.get_json(&["games"], token).await
    }

    async fn create_game(&self, token: &str, game: &NewGame) -> Result<(), ApiError> {
        self.post(&["games"], Some(token), game).await?;
        Ok(())
    }

    async fn list_comments(&self, token: &str, game_id: &str) -> Result<Vec<Comment>, ApiError> {
        self.get_json(&["games", game_id, "comments"], token).await
    }

    async fn post_comment(&self, token: &str, game_id: &str, comment: &CommentText) -> Result<(), ApiError> {
        self.post(&["games", game_id, "comments"], Some(token), comment).await?;
        Ok(())
    }

    async fn score(&self, token: &str, game_id: &str) -> Result<ScoreAggregate, ApiError> {
        self.get_json(&["games", game_id, "scores"], token).await
    }

    async fn post_score(&self, token: &str, game_id: &str, score: Score) -> Result<(), ApiError> {
        self.post(&["games", game_id, "scores"], Some(token), &score).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
