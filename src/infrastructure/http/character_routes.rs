//! HTTP routes for character sheets, grimoires and spell slots

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::errors::AppError;
use crate::application::services::CharacterService;
use crate::domain::entities::{Character, KnownSpell};
use crate::domain::services::{Grimoire, SlotSummary};
use crate::domain::value_objects::{
    CharacterId, SelectionState, SlotField, SpellId, SpellLevel,
};
use crate::infrastructure::http::session::{error_response, RequireSession};
use crate::infrastructure::state::AppState;

// =============================================================================
// Request/Response DTOs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotResponseDto {
    pub level: u8,
    pub current: u32,
    pub max: u32,
}

impl From<SlotSummary> for SlotResponseDto {
    fn from(slot: SlotSummary) -> Self {
        Self {
            level: slot.level.value(),
            current: slot.current,
            max: slot.max,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownSpellDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl From<KnownSpell> for KnownSpellDto {
    fn from(known: KnownSpell) -> Self {
        Self {
            name: known.name,
            level: known.level.map(SpellLevel::value),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterResponseDto {
    pub id: String,
    pub name: String,
    pub class_name: String,
    pub level: u32,
    pub current_hp: u32,
    pub max_hp: u32,
    pub spell_slots: Vec<SlotResponseDto>,
    pub known_spells: Vec<KnownSpellDto>,
    pub shared: bool,
}

impl From<Character> for CharacterResponseDto {
    fn from(character: Character) -> Self {
        Self {
            id: character.id.to_string(),
            spell_slots: character
                .spell_slots
                .iter()
                .map(|(level, pair)| SlotResponseDto {
                    level: level.value(),
                    current: pair.current,
                    max: pair.max,
                })
                .collect(),
            known_spells: character
                .known_spells
                .into_iter()
                .map(KnownSpellDto::from)
                .collect(),
            shared: character.share_token.is_some(),
            name: character.name,
            class_name: character.class_name,
            level: character.level,
            current_hp: character.current_hp,
            max_hp: character.max_hp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrimoireSpellDto {
    pub id: String,
    pub name: String,
    pub school: String,
    pub casting_time: String,
    pub range: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrimoireLevelDto {
    pub level: u8,
    pub label: String,
    pub spells: Vec<GrimoireSpellDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrimoireResponseDto {
    pub character_id: String,
    pub levels: Vec<GrimoireLevelDto>,
    pub slots: Vec<SlotResponseDto>,
}

impl GrimoireResponseDto {
    fn new(id: CharacterId, grimoire: Grimoire) -> Self {
        Self {
            character_id: id.to_string(),
            levels: grimoire
                .spells_by_level
                .into_iter()
                .map(|(level, spells)| GrimoireLevelDto {
                    level: level.value(),
                    label: level.label(),
                    spells: spells
                        .into_iter()
                        .map(|spell| GrimoireSpellDto {
                            id: spell.id.to_string(),
                            name: spell.name,
                            school: spell.school.to_string(),
                            casting_time: spell.casting_time,
                            range: spell.range,
                        })
                        .collect(),
                })
                .collect(),
            slots: grimoire.slots.into_iter().map(SlotResponseDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSpellsRequestDto {
    pub spell_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSpellsResponseDto {
    pub character: CharacterResponseDto,
    pub added: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustSlotRequestDto {
    pub field: SlotField,
    pub delta: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustHitPointsRequestDto {
    pub delta: i32,
}

pub(crate) fn parse_character_id(id: &str) -> Result<CharacterId, (StatusCode, String)> {
    Uuid::parse_str(id)
        .map(CharacterId::from_uuid)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid character ID".to_string()))
}

// =============================================================================
// Route Handlers
// =============================================================================

/// List the session owner's characters
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
) -> Result<Json<Vec<CharacterResponseDto>>, (StatusCode, String)> {
    let characters = state
        .character_service
        .list_characters(&session)
        .await
        .map_err(error_response)?;

    Ok(Json(characters.into_iter().map(CharacterResponseDto::from).collect()))
}

/// Re-fetch the character list from the store
pub async fn refresh_characters(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
) -> Result<Json<Vec<CharacterResponseDto>>, (StatusCode, String)> {
    let characters = state
        .character_service
        .refresh(&session)
        .await
        .map_err(error_response)?;

    Ok(Json(characters.into_iter().map(CharacterResponseDto::from).collect()))
}

/// Get a character by ID
pub async fn get_character(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;
    let character = state
        .character_service
        .get_character(&session, id)
        .await
        .map_err(error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// Delete a character
pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let id = parse_character_id(&id)?;
    state
        .character_service
        .delete_character(&session, id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Known spells grouped by level, with slot summaries
pub async fn get_grimoire(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
) -> Result<Json<GrimoireResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;
    let grimoire = state
        .character_service
        .grimoire(&session, id)
        .await
        .map_err(error_response)?;

    Ok(Json(GrimoireResponseDto::new(id, grimoire)))
}

/// Commit a spell selection to the character's known spells
pub async fn add_spells(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
    Json(req): Json<AddSpellsRequestDto>,
) -> Result<Json<AddSpellsResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;
    let selection = SelectionState::from_ids(req.spell_ids.into_iter().map(SpellId::new));

    let outcome = state
        .character_service
        .add_spells(&session, id, &selection)
        .await
        .map_err(error_response)?;

    Ok(Json(AddSpellsResponseDto {
        character: CharacterResponseDto::from(outcome.character),
        added: outcome.added.into_iter().map(|known| known.name).collect(),
    }))
}

/// Remove a known spell by name
pub async fn remove_spell(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Path((id, name)): Path<(String, String)>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;
    let character = state
        .character_service
        .remove_spell(&session, id, &name)
        .await
        .map_err(error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// Adjust current or max slots for one level
pub async fn adjust_slot(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Path((id, level)): Path<(String, u8)>,
    Json(req): Json<AdjustSlotRequestDto>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;
    let level = SpellLevel::try_from(level)
        .map_err(AppError::from)
        .map_err(error_response)?;

    let character = state
        .character_service
        .adjust_slot(&session, id, level, req.field, req.delta)
        .await
        .map_err(error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// Adjust current hit points
pub async fn adjust_hit_points(
    State(state): State<Arc<AppState>>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
    Json(req): Json<AdjustHitPointsRequestDto>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;
    let character = state
        .character_service
        .adjust_hit_points(&session, id, req.delta)
        .await
        .map_err(error_response)?;

    Ok(Json(CharacterResponseDto::from(character)))
}
