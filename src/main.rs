mod api;
mod config;
mod routes;
mod services;
mod state;
mod views;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env().expect("invalid configuration");
    let api = api::HttpGameApi::new(&config.api_base_url, config.timeouts).expect("backend client init failed");
    let port = config.port;

    tracing::info!(
        api_base_url = %config.api_base_url,
        cookie_secure = config.cookie_secure,
        "games backend configured"
    );

    let state = state::AppState::new(config, Arc::new(api), Arc::new(services::session::TracingSessionEvents));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "game panel listening");
    axum::serve(listener, app).await.expect("server failed");
}
