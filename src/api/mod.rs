//! Games backend client.
//!
//! DESIGN
//! ======
//! Every backend endpoint is one method on [`GameApi`] returning
//! `Result<T, ApiError>`. Route handlers hold an `Arc<dyn GameApi>` so tests
//! can swap in an in-memory backend. Read fallbacks live one layer up in
//! `services::fetch`; this layer never swallows errors.

pub mod http;
pub mod types;

pub use http::HttpGameApi;
pub use types::{ApiError, Comment, CommentText, Credentials, GameBundle, JwtResponse, NewGame, Score, ScoreAggregate};

/// Async interface to the games backend. Object-safe via `async_trait`.
#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    /// `POST /accounts`: create an account and return its token.
    async fn register(&self, credentials: &Credentials) -> Result<JwtResponse, ApiError>;

    /// `POST /accounts/jwt`: exchange credentials for a token.
    async fn login(&self, credentials: &Credentials) -> Result<JwtResponse, ApiError>;

    /// `GET /games`
    async fn list_games(&self, token: &str) -> Result<Vec<GameBundle>, ApiError>;

    /// `POST /games`
    async fn create_game(&self, token: &str, game: &NewGame) -> Result<(), ApiError>;

    /// `GET /games/{id}/comments`
    async fn list_comments(&self, token: &str, game_id: &str) -> Result<Vec<Comment>, ApiError>;

    /// `POST /games/{id}/comments`
    async fn post_comment(&self, token: &str, game_id: &str, comment: &CommentText) -> Result<(), ApiError>;

    /// `GET /games/{id}/scores`
    async fn score(&self, token: &str, game_id: &str) -> Result<ScoreAggregate, ApiError>;

    /// `POST /games/{id}/scores`
    async fn post_score(&self, token: &str, game_id: &str, score: Score) -> Result<(), ApiError>;
}
