//! HTTP surface of the addon
//!
//! Exposes the manifest and the directory, item and source actions.

pub mod actions;
pub mod error;
pub mod health;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use vimeo_addon_core::Addon;

pub use error::{AppError, AppResult};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub addon: Arc<dyn Addon>,
}

/// Create the HTTP router for an addon
pub fn create_router(addon: Arc<dyn Addon>) -> Router {
    let addon_id = addon.manifest().id.clone();
    let state = AppState { addon };

    Router::new()
        .merge(health::create_health_router())
        .merge(actions::action_routes(&addon_id))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
