//! Addon action routes
//!
//! The host calls every action with a JSON body under `/{addon id}/...`.

use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde_json::Value;

use vimeo_addon_core::addon::{
    AddonManifest, DirectoryRequest, DirectoryResponse, ItemRequest, MainItem, Source,
};

use crate::http::{error::AppResult, AppState};

/// Build action routes for the addon identified by `addon_id`
pub fn action_routes(addon_id: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("/{addon_id}"), get(manifest))
        .route(&format!("/{addon_id}/addon"), post(manifest))
        .route(&format!("/{addon_id}/directory"), post(directory))
        .route(&format!("/{addon_id}/item"), post(item))
        .route(&format!("/{addon_id}/source"), post(source))
}

/// GET /{id} and POST /{id}/addon - Addon manifest
async fn manifest(State(state): State<AppState>) -> Json<AddonManifest> {
    Json(state.addon.manifest().clone())
}

/// POST /{id}/directory - Paginated listing
async fn directory(
    State(state): State<AppState>,
    Json(request): Json<DirectoryRequest>,
) -> AppResult<Json<DirectoryResponse>> {
    Ok(Json(state.addon.directory(request).await?))
}

/// POST /{id}/item - Single playable item, tagged `"type": "channel"`
async fn item(
    State(state): State<AppState>,
    Json(request): Json<ItemRequest>,
) -> AppResult<Json<MainItem>> {
    let item = state.addon.item(request).await?;
    Ok(Json(MainItem::Channel(item)))
}

/// POST /{id}/source - Extra sources; items already carry theirs
async fn source(
    State(state): State<AppState>,
    Json(request): Json<Value>,
) -> AppResult<Json<Vec<Source>>> {
    Ok(Json(state.addon.source(request).await?))
}
