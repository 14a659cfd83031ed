use sea_orm::Database;
use tracing::info;

use backoffice_admin::config::AdminConfig;
use backoffice_admin::router::build_router;
use backoffice_admin::state::AppState;
use backoffice_core::config::Config;
use backoffice_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AdminConfig::from_env().expect("invalid admin configuration");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState::new(db);

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.admin_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("admin service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
