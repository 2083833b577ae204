//! HTTP routes for browsing and selecting spells

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::dto::{SpellViewRequest, SpellViewResponse};
use crate::domain::entities::{DndClass, Spell};
use crate::infrastructure::http::session::error_response;
use crate::infrastructure::state::AppState;

// =============================================================================
// Request/Response DTOs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassResponseDto {
    pub name: String,
    pub subclasses: Vec<String>,
}

impl From<&DndClass> for ClassResponseDto {
    fn from(class: &DndClass) -> Self {
        Self {
            name: class.name.clone(),
            subclasses: class.subclasses.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpellSearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub school: Option<String>,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// List classes that can cast spells
pub async fn list_spellcasting_classes(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<ClassResponseDto>> {
    Json(
        state
            .spell_catalog
            .spellcasting_classes()
            .into_iter()
            .map(ClassResponseDto::from)
            .collect(),
    )
}

/// Filtered, sorted spells for a class
pub async fn search_class_spells(
    State(state): State<Arc<AppState>>,
    Path(class_name): Path<String>,
    Query(params): Query<SpellSearchParams>,
) -> Result<Json<Vec<Spell>>, (StatusCode, String)> {
    let spells = state
        .spell_catalog
        .search(&class_name, &params.q, params.school.as_deref())
        .map_err(error_response)?;
    Ok(Json(spells))
}

/// Render the spell-selection list for a class
pub async fn spell_view(
    State(state): State<Arc<AppState>>,
    Path(class_name): Path<String>,
    Json(req): Json<SpellViewRequest>,
) -> Result<Json<SpellViewResponse>, (StatusCode, String)> {
    let view = state
        .spell_catalog
        .spell_view(&class_name, req)
        .map_err(error_response)?;
    Ok(Json(view))
}
