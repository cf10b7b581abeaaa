mod app;
mod auth;
mod config;
mod error;
mod expiry;
mod inventory;
mod recipes;
mod state;
mod tagline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "expirysense=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;
    tracing::info!(
        recipes = app_state.catalog.len(),
        postgres = app_state.config.database_url.is_some(),
        "state initialised"
    );

    app::serve(app::build_app(app_state)).await
}
