mod config;
mod db;
mod routes;
mod services;
mod state;

use services::content::{Catalog, load_dir};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid configuration");

    let pool = match config.database_url.as_deref() {
        Some(url) => Some(db::init_pool(url).await.expect("database init failed")),
        None => {
            tracing::warn!("DATABASE_URL not set; like counts are kept in memory only");
            None
        }
    };

    let catalog = match load_dir(&config.content_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(error = %e, "content unavailable; serving an empty blog");
            Catalog::default()
        }
    };

    let state = state::AppState::new(pool, catalog);

    if let Err(e) = services::likes::restore(&state).await {
        tracing::error!(error = %e, "failed to restore like counts");
    }

    // Spawn background persistence task.
    let _persistence = services::persistence::spawn_persistence_task(state.clone());

    let app = match routes::leptos_app(state.clone(), &config.site_dir) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "leptos unavailable; serving API and static files only");
            routes::app(state, &config.site_dir)
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "blog listening");
    axum::serve(listener, app).await.expect("server failed");
}
