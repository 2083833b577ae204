//! HTTP REST API routes

mod character_routes;
mod session;
mod share_routes;
mod spell_routes;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Reference data
        .route("/api/classes", get(spell_routes::list_spellcasting_classes))
        .route(
            "/api/classes/{name}/spells",
            get(spell_routes::search_class_spells),
        )
        .route(
            "/api/classes/{name}/spell-view",
            post(spell_routes::spell_view),
        )
        // Characters
        .route("/api/characters", get(character_routes::list_characters))
        .route(
            "/api/characters/refresh",
            post(character_routes::refresh_characters),
        )
        .route(
            "/api/characters/{id}",
            get(character_routes::get_character).delete(character_routes::delete_character),
        )
        .route(
            "/api/characters/{id}/grimoire",
            get(character_routes::get_grimoire),
        )
        .route(
            "/api/characters/{id}/spells",
            post(character_routes::add_spells),
        )
        .route(
            "/api/characters/{id}/spells/{name}",
            delete(character_routes::remove_spell),
        )
        .route(
            "/api/characters/{id}/slots/{level}",
            post(character_routes::adjust_slot),
        )
        .route(
            "/api/characters/{id}/hit-points",
            post(character_routes::adjust_hit_points),
        )
        // Sharing
        .route(
            "/api/characters/{id}/share",
            post(share_routes::share_character).delete(share_routes::revoke_share),
        )
        .route(
            "/api/shared/{token}",
            get(share_routes::get_shared_character),
        )
}
