use sea_orm::Database;
use tracing::info;

use gigmarket_core::config::Config;
use gigmarket_core::tracing::init_tracing;
use gigmarket_marketplace::config::MarketplaceConfig;
use gigmarket_marketplace::router::build_router;
use gigmarket_marketplace::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing("info,gigmarket_marketplace=debug");

    let config = MarketplaceConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    if config.mail_api_url.is_none() {
        info!("MAIL_API_URL not set, confirmation emails will only be logged");
    }

    let state = AppState::new(db, &config);
    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.marketplace_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("marketplace service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
