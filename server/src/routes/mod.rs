//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the likes HTTP + websocket endpoints and the content API,
//! and stitches them with Leptos SSR rendering under a single Axum router.
//! Static assets (`/pkg`, images) come from the site root.

pub mod articles;
pub mod likes;
pub mod live;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes shared by the SSR app and the API-only fallback.
pub(crate) fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/likes/.json", get(likes::counts))
        .route("/api/likes/register", get(likes::register))
        .route("/api/likes/live", get(live::handle_live))
        .route("/api/articles", get(articles::list_articles))
        .route("/api/articles/{slug}", get(articles::get_article))
        .route("/api/tags", get(articles::list_tags))
        .route("/api/tags/{tag}", get(articles::list_tagged))
        .route("/api/categories", get(articles::list_categories))
        .route("/api/categories/{category}", get(articles::list_in_category))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// API routes plus static files from `site_dir`, without SSR.
pub fn app(state: AppState, site_dir: &Path) -> Router {
    api_routes(state)
        .fallback_service(ServeDir::new(site_dir).append_index_html_on_directories(true))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Leptos SSR frontend: API routes + Leptos SSR pages + `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section).
pub fn leptos_app(state: AppState, site_dir: &Path) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(blog_client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || blog_client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = Path::new(leptos_options.site_root.as_ref()).to_owned();

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .fallback_service(ServeDir::new(site_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
