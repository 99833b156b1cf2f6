//! Read-side fetchers with safe fallbacks.
//!
//! ERROR HANDLING
//! ==============
//! Reads never fail from the caller's point of view: a transport or backend
//! error is logged and replaced with an empty list or a zeroed aggregate, so
//! a page renders "no data" rather than an error.

use futures::future::join_all;

use crate::api::{Comment, GameApi, GameBundle, ScoreAggregate};

/// Everything one game card needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GameCardData {
    pub game: GameBundle,
    pub comments: Vec<Comment>,
    pub score: ScoreAggregate,
}

/// `GET /games`, or an empty list.
pub async fn fetch_games(api: &dyn GameApi, token: &str) -> Vec<GameBundle> {
    api.list_games(token).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "game list fetch failed; rendering none");
        Vec::new()
    })
}

/// `GET /games/{id}/comments`, or an empty list.
pub async fn fetch_comments(api: &dyn GameApi, game_id: &str, token: &str) -> Vec<Comment> {
    api.list_comments(token, game_id)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, %game_id, "comment fetch failed; rendering none");
            Vec::new()
        })
}

/// `GET /games/{id}/scores`, or a zeroed aggregate.
pub async fn fetch_score(api: &dyn GameApi, game_id: &str, token: &str) -> ScoreAggregate {
    api.score(token, game_id).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, %game_id, "score fetch failed; rendering zero");
        ScoreAggregate::default()
    })
}

/// Load the game list, then every game's comments and score concurrently.
pub async fn load_panel(api: &dyn GameApi, token: &str) -> Vec<GameCardData> {
    let games = fetch_games(api, token).await;
    join_all(games.into_iter().map(|game| async move {
        let (comments, score) = futures::join!(fetch_comments(api, &game.id, token), fetch_score(api, &game.id, token));
        GameCardData { game, comments, score }
    }))
    .await
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
