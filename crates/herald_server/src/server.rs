//! Router assembly and serving.

use crate::routes;
use axum::Router;
use axum::routing::{get, put};
use herald_store::GuildStore;
use std::sync::Arc;
use tracing::info;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// The guild store backing every route
    pub store: Arc<GuildStore>,
}

/// Build the dashboard API router.
pub fn app(store: Arc<GuildStore>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/guilds/:guild_id/macros",
            get(routes::list_macros).post(routes::create_macro),
        )
        .route(
            "/guilds/:guild_id/macros/:name",
            get(routes::get_macro).delete(routes::delete_macro),
        )
        .route("/guilds/:guild_id/config", get(routes::get_config))
        .route(
            "/guilds/:guild_id/config/temperature",
            put(routes::set_temperature),
        )
        .with_state(AppState { store })
}

/// Bind `bind_addr` and serve the API until shutdown.
pub async fn serve(store: Arc<GuildStore>, bind_addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = bind_addr, "Dashboard API listening");
    axum::serve(listener, app(store)).await
}
