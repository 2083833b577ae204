//! HTTP routes for sharing character sheets

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::services::CharacterService;
use crate::infrastructure::http::character_routes::{parse_character_id, CharacterResponseDto};
use crate::infrastructure::http::session::{error_response, RequireSession};
use crate::infrastructure::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareTokenResponseDto {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Issue a share token for a character
pub async fn share_character(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ShareTokenResponseDto>), (StatusCode, String)> {
    let id = parse_character_id(&id)?;
    let token = state
        .character_service
        .share(&session, id)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ShareTokenResponseDto {
            token: token.token,
            created_at: token.created_at.map(|t| t.to_rfc3339()),
        }),
    ))
}

/// Revoke a character's share token
pub async fn revoke_share(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let id = parse_character_id(&id)?;
    state
        .character_service
        .revoke_share(&session, id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Read-only view of a shared character
pub async fn get_shared_character(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let character = state
        .character_service
        .shared_character(&token)
        .await
        .map_err(error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}
