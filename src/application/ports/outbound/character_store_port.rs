//! Character store port - The remote store that owns character records
//!
//! Owner-scoped calls take a `&Session`; only the share-token read path is
//! anonymous.

use async_trait::async_trait;

use crate::domain::entities::{Character, KnownSpell, SpellSlots};
use crate::domain::value_objects::{CharacterId, Session, ShareToken};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Store returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Store rejected the credential")]
    Unauthorized,
    #[error("Malformed store response: {0}")]
    Decode(String),
}

/// A partial update of one character field
#[derive(Debug, Clone, PartialEq)]
pub enum CharacterPatch {
    SpellSlots(SpellSlots),
    KnownSpells(Vec<KnownSpell>),
    CurrentHp(u32),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterStorePort: Send + Sync {
    /// List the session owner's characters
    async fn list(&self, session: &Session) -> Result<Vec<Character>, StoreError>;

    /// Fetch one character
    async fn get(&self, session: &Session, id: CharacterId)
        -> Result<Option<Character>, StoreError>;

    /// Apply a partial update and return the persisted record
    async fn update(
        &self,
        session: &Session,
        id: CharacterId,
        patch: CharacterPatch,
    ) -> Result<Character, StoreError>;

    /// Delete a character
    async fn delete(&self, session: &Session, id: CharacterId) -> Result<(), StoreError>;

    /// Issue a read-only share token for a character
    async fn issue_share_token(
        &self,
        session: &Session,
        id: CharacterId,
    ) -> Result<ShareToken, StoreError>;

    /// Revoke the character's share token
    async fn revoke_share_token(&self, session: &Session, id: CharacterId)
        -> Result<(), StoreError>;

    /// Read a shared character without a session
    async fn get_shared(&self, token: &str) -> Result<Option<Character>, StoreError>;
}
