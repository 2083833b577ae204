//! Character store client - REST adapter for the remote character store
//!
//! The store exposes a PostgREST-style API: table rows under `/characters`
//! filtered with `id=eq.<uuid>`, and share-token operations as RPC calls
//! under `/rpc`.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::outbound::{CharacterPatch, CharacterStorePort, StoreError};
use crate::domain::entities::{Character, KnownSpell, SlotPair, SpellSlots};
use crate::domain::value_objects::{CharacterId, Session, ShareToken, SpellLevel};
use crate::infrastructure::config::AppConfig;

/// Client for the character store API
pub struct HttpCharacterStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpCharacterStore {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.store_base_url.trim_end_matches('/').to_string(),
            api_key: config.store_api_key.clone(),
        })
    }

    fn characters_url(&self) -> String {
        format!("{}/characters", self.base_url)
    }

    fn rpc_url(&self, function: &str) -> String {
        format!("{}/rpc/{}", self.base_url, function)
    }

    fn with_api_key(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key),
            None => request,
        }
    }

    fn authorized(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        self.with_api_key(request).bearer_auth(session.access_token())
    }

    fn id_filter(id: CharacterId) -> [(&'static str, String); 1] {
        [("id", format!("eq.{}", id))]
    }

    async fn send(request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn first_record(response: Response) -> Result<Option<Character>, StoreError> {
        let records: Vec<CharacterRecord> = Self::decode(response).await?;
        records
            .into_iter()
            .next()
            .map(Character::try_from)
            .transpose()
    }
}

// =============================================================================
// Wire format
// =============================================================================

/// A character row as the store returns it
#[derive(Debug, Deserialize)]
pub struct CharacterRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "class", default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub level: Value,
    #[serde(default)]
    pub hp_current: Value,
    #[serde(default)]
    pub hp_max: Value,
    #[serde(default)]
    pub spell_slots: Value,
    #[serde(default)]
    pub spells_known: Value,
    #[serde(default)]
    pub share_token: Option<String>,
}

/// A bare spell name or a `{name, level}` object, as written back to the store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KnownSpellRecord {
    Name(String),
    Entry {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<u8>,
    },
}

impl From<&KnownSpell> for KnownSpellRecord {
    fn from(known: &KnownSpell) -> Self {
        match known.level {
            Some(level) => KnownSpellRecord::Entry {
                name: known.name.clone(),
                level: Some(level.value()),
            },
            None => KnownSpellRecord::Name(known.name.clone()),
        }
    }
}

fn count(value: &Value) -> Option<u32> {
    let number = value.as_f64()?;
    Some(number.max(0.0).min(f64::from(u32::MAX)) as u32)
}

/// Read `{"<level>": [current, max], ...}`, keeping only well-formed pairs
pub fn parse_spell_slots(raw: &Value) -> SpellSlots {
    let Some(map) = raw.as_object() else {
        return SpellSlots::new();
    };

    map.iter()
        .filter_map(|(key, value)| {
            let level = key.trim().parse::<u8>().ok().and_then(SpellLevel::new);
            let pair = value.as_array().filter(|a| a.len() >= 2).and_then(|a| {
                Some(SlotPair::new(count(&a[0])?, count(&a[1])?))
            });
            match (level, pair) {
                (Some(level), Some(pair)) => Some((level, pair)),
                _ => {
                    debug!(key = %key, value = %value, "Skipping malformed spell slot entry");
                    None
                }
            }
        })
        .collect()
}

fn known_spell(value: &Value) -> Option<KnownSpell> {
    let (name, level) = match value {
        Value::String(name) => (name.as_str(), None),
        Value::Object(entry) => (entry.get("name")?.as_str()?, entry.get("level")),
        _ => return None,
    };
    if name.trim().is_empty() {
        return None;
    }
    // An unusable level is treated as absent; the name still resolves
    let level = level
        .and_then(Value::as_u64)
        .and_then(|l| u8::try_from(l).ok())
        .and_then(SpellLevel::new);
    Some(match level {
        Some(level) => KnownSpell::with_level(name, level),
        None => KnownSpell::named(name),
    })
}

/// Read the known-spell list, keeping entries that carry a usable name
pub fn parse_known_spells(raw: &Value) -> Vec<KnownSpell> {
    let Some(entries) = raw.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let known = known_spell(entry);
            if known.is_none() {
                debug!(entry = %entry, "Skipping malformed known spell entry");
            }
            known
        })
        .collect()
}

/// Inverse of [`parse_spell_slots`]
pub fn spell_slots_json(slots: &SpellSlots) -> Value {
    let map: BTreeMap<String, [u32; 2]> = slots
        .iter()
        .map(|(level, pair)| (level.to_string(), [pair.current, pair.max]))
        .collect();
    json!(map)
}

impl TryFrom<CharacterRecord> for Character {
    type Error = StoreError;

    fn try_from(record: CharacterRecord) -> Result<Self, Self::Error> {
        if record.name.trim().is_empty() {
            return Err(StoreError::Decode(format!(
                "character {} has no name",
                record.id
            )));
        }
        let max_hp = count(&record.hp_max).unwrap_or(0);
        Ok(Character {
            id: CharacterId::from_uuid(record.id),
            name: record.name,
            class_name: record.class_name.unwrap_or_default(),
            level: count(&record.level).filter(|l| *l > 0).unwrap_or(1),
            current_hp: count(&record.hp_current).unwrap_or(0).min(max_hp),
            max_hp,
            spell_slots: parse_spell_slots(&record.spell_slots),
            known_spells: parse_known_spells(&record.spells_known),
            share_token: record.share_token.filter(|t| !t.is_empty()),
        })
    }
}

/// Convert a listing row by row, skipping rows that cannot be read
pub fn characters_from_rows(rows: Vec<Value>) -> Vec<Character> {
    rows.into_iter()
        .filter_map(|row| {
            let character = serde_json::from_value::<CharacterRecord>(row)
                .map_err(|e| StoreError::Decode(e.to_string()))
                .and_then(Character::try_from);
            character
                .inspect_err(|e| warn!(error = %e, "Skipping unreadable character row"))
                .ok()
        })
        .collect()
}

/// Partial update body for one field
pub fn patch_body(patch: &CharacterPatch) -> Value {
    match patch {
        CharacterPatch::SpellSlots(slots) => json!({ "spell_slots": spell_slots_json(slots) }),
        CharacterPatch::KnownSpells(known) => {
            let records: Vec<KnownSpellRecord> = known.iter().map(KnownSpellRecord::from).collect();
            json!({ "spells_known": records })
        }
        CharacterPatch::CurrentHp(hp) => json!({ "hp_current": hp }),
    }
}

#[derive(Debug, Deserialize)]
struct ShareTokenRecord {
    token: String,
    #[serde(default)]
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

// =============================================================================
// CharacterStorePort Implementation
// =============================================================================

#[async_trait]
impl CharacterStorePort for HttpCharacterStore {
    async fn list(&self, session: &Session) -> Result<Vec<Character>, StoreError> {
        let request = self
            .client
            .get(self.characters_url())
            .query(&[("select", "*"), ("order", "name.asc")]);
        let response = Self::send(self.authorized(request, session)).await?;
        let rows: Vec<Value> = Self::decode(response).await?;
        Ok(characters_from_rows(rows))
    }

    async fn get(
        &self,
        session: &Session,
        id: CharacterId,
    ) -> Result<Option<Character>, StoreError> {
        let request = self
            .client
            .get(self.characters_url())
            .query(&[("select", "*")])
            .query(&Self::id_filter(id));
        let response = Self::send(self.authorized(request, session)).await?;
        Self::first_record(response).await
    }

    async fn update(
        &self,
        session: &Session,
        id: CharacterId,
        patch: CharacterPatch,
    ) -> Result<Character, StoreError> {
        let request = self
            .client
            .patch(self.characters_url())
            .query(&Self::id_filter(id))
            .header("Prefer", "return=representation")
            .json(&patch_body(&patch));
        let response = Self::send(self.authorized(request, session)).await?;
        Self::first_record(response).await?.ok_or(StoreError::Api {
            status: StatusCode::NOT_FOUND.as_u16(),
            message: format!("character {} was not updated", id),
        })
    }

    async fn delete(&self, session: &Session, id: CharacterId) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(self.characters_url())
            .query(&Self::id_filter(id));
        Self::send(self.authorized(request, session)).await?;
        Ok(())
    }

    async fn issue_share_token(
        &self,
        session: &Session,
        id: CharacterId,
    ) -> Result<ShareToken, StoreError> {
        let request = self
            .client
            .post(self.rpc_url("create_share_token"))
            .json(&json!({ "character_id": id }));
        let response = Self::send(self.authorized(request, session)).await?;
        let record: ShareTokenRecord = Self::decode(response).await?;
        Ok(ShareToken {
            token: record.token,
            created_at: record.created_at,
        })
    }

    async fn revoke_share_token(
        &self,
        session: &Session,
        id: CharacterId,
    ) -> Result<(), StoreError> {
        let request = self
            .client
            .post(self.rpc_url("revoke_share_token"))
            .json(&json!({ "character_id": id }));
        Self::send(self.authorized(request, session)).await?;
        Ok(())
    }

    async fn get_shared(&self, token: &str) -> Result<Option<Character>, StoreError> {
        let request = self
            .client
            .post(self.rpc_url("get_shared_character"))
            .json(&json!({ "share_token": token }));
        let response = Self::send(self.with_api_key(request)).await?;
        let record: Option<CharacterRecord> = Self::decode(response).await?;
        record.map(Character::try_from).transpose()
    }
}
