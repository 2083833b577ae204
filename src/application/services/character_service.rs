//! Character Service - Application service for a user's character sheets
//!
//! This service keeps a short-lived cached copy of each session's character
//! list, resolves grimoires against the spell catalog, and applies bounded
//! slot and hit-point adjustments. Every mutation is a single update call to
//! the store; the cache only changes after the store accepts it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::application::errors::AppError;
use crate::application::ports::outbound::{CharacterPatch, CharacterStorePort, StoreError};
use crate::application::services::SpellCatalogService;
use crate::domain::entities::{Character, KnownSpell};
use crate::domain::services::{
    adjust_hit_points, adjust_slots, merge_known_spells, remove_known_spell, Grimoire,
};
use crate::domain::value_objects::{
    CharacterId, SelectionState, Session, ShareToken, SlotField, SpellLevel,
};

/// Outcome of committing a spell selection
#[derive(Debug, Clone)]
pub struct AddSpellsOutcome {
    pub character: Character,
    pub added: Vec<KnownSpell>,
}

/// Character service trait defining the application use cases
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// List characters, from the cache when it is warm
    async fn list_characters(&self, session: &Session) -> Result<Vec<Character>, AppError>;

    /// Re-fetch the full list from the store, replacing the cache
    async fn refresh(&self, session: &Session) -> Result<Vec<Character>, AppError>;

    /// Get a character by ID
    async fn get_character(&self, session: &Session, id: CharacterId)
        -> Result<Character, AppError>;

    /// Delete a character, then drop it from the cache
    async fn delete_character(&self, session: &Session, id: CharacterId) -> Result<(), AppError>;

    /// Known spells grouped by level, with slot summaries
    async fn grimoire(&self, session: &Session, id: CharacterId) -> Result<Grimoire, AppError>;

    /// Add the selected spells to the character's known list
    async fn add_spells(
        &self,
        session: &Session,
        id: CharacterId,
        selection: &SelectionState,
    ) -> Result<AddSpellsOutcome, AppError>;

    /// Forget a known spell by name
    async fn remove_spell(
        &self,
        session: &Session,
        id: CharacterId,
        name: &str,
    ) -> Result<Character, AppError>;

    /// Apply a bounded change to one level's current or max slots
    async fn adjust_slot(
        &self,
        session: &Session,
        id: CharacterId,
        level: SpellLevel,
        field: SlotField,
        delta: i32,
    ) -> Result<Character, AppError>;

    /// Apply a bounded change to current hit points
    async fn adjust_hit_points(
        &self,
        session: &Session,
        id: CharacterId,
        delta: i32,
    ) -> Result<Character, AppError>;

    /// Issue a share token for read-only access
    async fn share(&self, session: &Session, id: CharacterId) -> Result<ShareToken, AppError>;

    /// Revoke the character's share token
    async fn revoke_share(&self, session: &Session, id: CharacterId) -> Result<(), AppError>;

    /// Read a shared character by token, no session required
    async fn shared_character(&self, token: &str) -> Result<Character, AppError>;
}

/// A session's character list and when it was fetched
#[derive(Debug, Clone)]
struct CachedList {
    characters: Vec<Character>,
    fetched_at: Instant,
}

/// Default implementation of CharacterService over a character store
///
/// Single-character reads always go to the store so that a revoked token is
/// noticed; only the list is served from cache, and only for `cache_ttl`.
pub struct CharacterServiceImpl {
    store: Arc<dyn CharacterStorePort>,
    catalog: Arc<SpellCatalogService>,
    /// Cached character lists keyed by access token
    cache: RwLock<HashMap<String, CachedList>>,
    cache_capacity: usize,
    cache_ttl: Duration,
}

impl CharacterServiceImpl {
    pub fn new(
        store: Arc<dyn CharacterStorePort>,
        catalog: Arc<SpellCatalogService>,
        cache_capacity: usize,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            store,
            catalog,
            cache: RwLock::new(HashMap::new()),
            cache_capacity: cache_capacity.max(1),
            cache_ttl,
        }
    }

    async fn cached(&self, session: &Session) -> Option<Vec<Character>> {
        self.cache
            .read()
            .await
            .get(session.access_token())
            .filter(|entry| entry.fetched_at.elapsed() < self.cache_ttl)
            .map(|entry| entry.characters.clone())
    }

    async fn store_list(&self, session: &Session, characters: Vec<Character>) {
        let mut cache = self.cache.write().await;
        if !cache.contains_key(session.access_token()) && cache.len() >= self.cache_capacity {
            debug!(sessions = cache.len(), "Character cache full, clearing");
            cache.clear();
        }
        cache.insert(
            session.access_token().to_string(),
            CachedList {
                characters,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Replace one cached character with the persisted record
    async fn store_one(&self, session: &Session, character: &Character) {
        let mut cache = self.cache.write().await;
        if let Some(entry) = cache.get_mut(session.access_token()) {
            match entry.characters.iter_mut().find(|c| c.id == character.id) {
                Some(cached) => *cached = character.clone(),
                None => entry.characters.push(character.clone()),
            }
        }
    }

    async fn forget_one(&self, session: &Session, id: CharacterId) {
        if let Some(entry) = self.cache.write().await.get_mut(session.access_token()) {
            entry.characters.retain(|c| c.id != id);
        }
    }

    async fn set_share_token(&self, session: &Session, id: CharacterId, token: Option<String>) {
        if let Some(entry) = self.cache.write().await.get_mut(session.access_token()) {
            if let Some(cached) = entry.characters.iter_mut().find(|c| c.id == id) {
                cached.share_token = token;
            }
        }
    }

    /// Drop everything cached for a session the store no longer accepts
    async fn checked<T>(
        &self,
        session: &Session,
        result: Result<T, StoreError>,
    ) -> Result<T, AppError> {
        if let Err(StoreError::Unauthorized) = &result {
            if self.cache.write().await.remove(session.access_token()).is_some() {
                info!("Store rejected session, cached characters dropped");
            }
        }
        Ok(result?)
    }

    async fn persist(
        &self,
        session: &Session,
        id: CharacterId,
        patch: CharacterPatch,
    ) -> Result<Character, AppError> {
        let result = self.store.update(session, id, patch).await;
        let character = self
            .checked(session, result)
            .await
            .inspect_err(|e| warn!(character_id = %id, error = %e, "Character update failed"))?;
        self.store_one(session, &character).await;
        Ok(character)
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self, session))]
    async fn list_characters(&self, session: &Session) -> Result<Vec<Character>, AppError> {
        if let Some(characters) = self.cached(session).await {
            debug!(count = characters.len(), "Serving cached character list");
            return Ok(characters);
        }
        self.refresh(session).await
    }

    #[instrument(skip(self, session))]
    async fn refresh(&self, session: &Session) -> Result<Vec<Character>, AppError> {
        let result = self.store.list(session).await;
        let characters = self.checked(session, result).await?;
        info!(count = characters.len(), "Fetched character list");
        self.store_list(session, characters.clone()).await;
        Ok(characters)
    }

    #[instrument(skip(self, session), fields(character_id = %id))]
    async fn get_character(
        &self,
        session: &Session,
        id: CharacterId,
    ) -> Result<Character, AppError> {
        let result = self.store.get(session, id).await;
        match self.checked(session, result).await? {
            Some(character) => {
                self.store_one(session, &character).await;
                Ok(character)
            }
            None => {
                self.forget_one(session, id).await;
                Err(AppError::CharacterNotFound(id))
            }
        }
    }

    #[instrument(skip(self, session), fields(character_id = %id))]
    async fn delete_character(&self, session: &Session, id: CharacterId) -> Result<(), AppError> {
        let result = self.store.delete(session, id).await;
        self.checked(session, result).await?;
        self.forget_one(session, id).await;
        info!(character_id = %id, "Deleted character");
        Ok(())
    }

    #[instrument(skip(self, session), fields(character_id = %id))]
    async fn grimoire(&self, session: &Session, id: CharacterId) -> Result<Grimoire, AppError> {
        let character = self.get_character(session, id).await?;
        let grimoire = Grimoire::aggregate(&character, self.catalog.all_spells());
        debug!(
            character_id = %id,
            spells = grimoire.spell_count(),
            slot_levels = grimoire.slots.len(),
            "Built grimoire"
        );
        Ok(grimoire)
    }

    #[instrument(skip(self, session, selection), fields(character_id = %id, selected = selection.len()))]
    async fn add_spells(
        &self,
        session: &Session,
        id: CharacterId,
        selection: &SelectionState,
    ) -> Result<AddSpellsOutcome, AppError> {
        if selection.is_empty() {
            return Err(AppError::Validation("Select at least one spell to add.".into()));
        }

        let character = self.get_character(session, id).await?;
        let spells = self.catalog.resolve_selection(selection);
        let merge = merge_known_spells(&character.known_spells, spells);

        if merge.is_unchanged() {
            debug!(character_id = %id, "Selected spells already known, nothing to persist");
            return Ok(AddSpellsOutcome {
                character,
                added: Vec::new(),
            });
        }

        let character = self
            .persist(session, id, CharacterPatch::KnownSpells(merge.known))
            .await?;
        info!(
            character_id = %id,
            added = merge.added.len(),
            "Added spells to {}",
            character.name
        );
        Ok(AddSpellsOutcome {
            character,
            added: merge.added,
        })
    }

    #[instrument(skip(self, session), fields(character_id = %id))]
    async fn remove_spell(
        &self,
        session: &Session,
        id: CharacterId,
        name: &str,
    ) -> Result<Character, AppError> {
        let character = self.get_character(session, id).await?;
        let Some(known) = remove_known_spell(&character.known_spells, name) else {
            debug!(character_id = %id, spell = name, "Spell not known, nothing to remove");
            return Ok(character);
        };
        self.persist(session, id, CharacterPatch::KnownSpells(known))
            .await
    }

    #[instrument(skip(self, session), fields(character_id = %id))]
    async fn adjust_slot(
        &self,
        session: &Session,
        id: CharacterId,
        level: SpellLevel,
        field: SlotField,
        delta: i32,
    ) -> Result<Character, AppError> {
        let character = self.get_character(session, id).await?;
        let slots = adjust_slots(&character.spell_slots, level, field, delta);
        self.persist(session, id, CharacterPatch::SpellSlots(slots))
            .await
    }

    #[instrument(skip(self, session), fields(character_id = %id))]
    async fn adjust_hit_points(
        &self,
        session: &Session,
        id: CharacterId,
        delta: i32,
    ) -> Result<Character, AppError> {
        let character = self.get_character(session, id).await?;
        let current = adjust_hit_points(character.current_hp, character.max_hp, delta);
        self.persist(session, id, CharacterPatch::CurrentHp(current))
            .await
    }

    #[instrument(skip(self, session), fields(character_id = %id))]
    async fn share(&self, session: &Session, id: CharacterId) -> Result<ShareToken, AppError> {
        let result = self.store.issue_share_token(session, id).await;
        let token = self.checked(session, result).await?;
        self.set_share_token(session, id, Some(token.token.clone()))
            .await;
        info!(character_id = %id, "Issued share token");
        Ok(token)
    }

    #[instrument(skip(self, session), fields(character_id = %id))]
    async fn revoke_share(&self, session: &Session, id: CharacterId) -> Result<(), AppError> {
        let result = self.store.revoke_share_token(session, id).await;
        self.checked(session, result).await?;
        self.set_share_token(session, id, None).await;
        info!(character_id = %id, "Revoked share token");
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn shared_character(&self, token: &str) -> Result<Character, AppError> {
        if token.trim().is_empty() {
            return Err(AppError::SharedCharacterNotFound);
        }
        self.store
            .get_shared(token.trim())
            .await?
            .ok_or(AppError::SharedCharacterNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::MockCharacterStorePort;
    use crate::application::services::ReferenceData;
    use crate::domain::entities::{SlotPair, Spell, SpellSchool};
    use crate::domain::value_objects::SpellId;
    use mockall::predicate::eq;

    fn level(n: u8) -> SpellLevel {
        SpellLevel::new(n).unwrap()
    }

    fn session() -> Session {
        Session::new("access-token").unwrap()
    }

    fn catalog() -> Arc<SpellCatalogService> {
        Arc::new(SpellCatalogService::new(ReferenceData {
            spells: vec![
                Spell::new("fireball", "Fireball", level(3), SpellSchool::Evocation)
                    .with_class("Wizard"),
                Spell::new("shield", "Shield", level(1), SpellSchool::Abjuration)
                    .with_class("Wizard"),
            ],
            classes: vec![],
        }))
    }

    fn wizard() -> Character {
        Character::new("Elara", "Wizard")
            .with_hp(8, 12)
            .with_slots(level(1), 4, 4)
            .with_slots(level(2), 1, 3)
            .with_known_spell(KnownSpell::named("Fireball"))
            .with_known_spell(KnownSpell::named("Unknown Spell"))
    }

    fn service(store: MockCharacterStorePort) -> CharacterServiceImpl {
        service_with_ttl(store, Duration::from_secs(300))
    }

    fn service_with_ttl(store: MockCharacterStorePort, ttl: Duration) -> CharacterServiceImpl {
        CharacterServiceImpl::new(Arc::new(store), catalog(), 8, ttl)
    }

    /// Echo a patch back onto `base` the way the store would persist it
    fn applied(base: &Character, patch: &CharacterPatch) -> Character {
        let mut character = base.clone();
        match patch {
            CharacterPatch::SpellSlots(slots) => character.spell_slots = slots.clone(),
            CharacterPatch::KnownSpells(known) => character.known_spells = known.clone(),
            CharacterPatch::CurrentHp(hp) => character.current_hp = *hp,
        }
        character
    }

    #[tokio::test]
    async fn test_list_uses_cache_after_first_fetch() {
        let character = wizard();
        let mut store = MockCharacterStorePort::new();
        let listed = vec![character.clone()];
        store
            .expect_list()
            .times(1)
            .returning(move |_| Ok(listed.clone()));

        let service = service(store);
        assert_eq!(service.list_characters(&session()).await.unwrap().len(), 1);
        assert_eq!(service.list_characters(&session()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_always_refetches() {
        let mut store = MockCharacterStorePort::new();
        store.expect_list().times(2).returning(|_| Ok(vec![wizard()]));

        let service = service(store);
        service.refresh(&session()).await.unwrap();
        service.refresh(&session()).await.unwrap();
    }

    #[tokio::test]
    async fn test_grimoire_drops_unknown_spells() {
        let character = wizard();
        let id = character.id;
        let mut store = MockCharacterStorePort::new();
        store
            .expect_get()
            .with(mockall::predicate::always(), eq(id))
            .returning(move |_, _| Ok(Some(character.clone())));

        let grimoire = service(store).grimoire(&session(), id).await.unwrap();

        assert_eq!(grimoire.spells_by_level.len(), 1);
        assert_eq!(grimoire.spells_by_level[&level(3)][0].name, "Fireball");
        assert_eq!(grimoire.slots.len(), 2);
    }

    #[tokio::test]
    async fn test_adjust_current_slot_clamps_at_zero() {
        let character = wizard();
        let id = character.id;
        let base = character.clone();
        let mut store = MockCharacterStorePort::new();
        store
            .expect_get()
            .returning(move |_, _| Ok(Some(character.clone())));
        store
            .expect_update()
            .times(1)
            .returning(move |_, _, patch| Ok(applied(&base, &patch)));

        let updated = service(store)
            .adjust_slot(&session(), id, level(1), SlotField::Current, -5)
            .await
            .unwrap();

        assert_eq!(updated.spell_slots.get(level(1)), Some(SlotPair { current: 0, max: 4 }));
    }

    #[tokio::test]
    async fn test_failed_adjustment_leaves_cache_unchanged() {
        let character = wizard();
        let id = character.id;
        let listed = vec![character.clone()];
        let fetched = character.clone();
        let mut store = MockCharacterStorePort::new();
        store.expect_list().times(1).returning(move |_| Ok(listed.clone()));
        store
            .expect_get()
            .returning(move |_, _| Ok(Some(fetched.clone())));
        store.expect_update().returning(|_, _, _| {
            Err(StoreError::Api {
                status: 503,
                message: "unavailable".into(),
            })
        });

        let service = service(store);
        service.list_characters(&session()).await.unwrap();

        let result = service
            .adjust_slot(&session(), id, level(2), SlotField::Max, 1)
            .await;
        assert!(matches!(result, Err(AppError::Store(_))));

        let cached = service.list_characters(&session()).await.unwrap();
        assert_eq!(
            cached[0].spell_slots.get(level(2)),
            Some(SlotPair { current: 1, max: 3 })
        );
    }

    #[tokio::test]
    async fn test_successful_adjustment_refreshes_cache() {
        let character = wizard();
        let id = character.id;
        let base = character.clone();
        let listed = vec![character.clone()];
        let mut store = MockCharacterStorePort::new();
        store.expect_list().times(1).returning(move |_| Ok(listed.clone()));
        store
            .expect_get()
            .returning(move |_, _| Ok(Some(character.clone())));
        store
            .expect_update()
            .returning(move |_, _, patch| Ok(applied(&base, &patch)));

        let service = service(store);
        service.list_characters(&session()).await.unwrap();
        service
            .adjust_slot(&session(), id, level(2), SlotField::Max, -2)
            .await
            .unwrap();

        let cached = service.list_characters(&session()).await.unwrap();
        assert_eq!(
            cached[0].spell_slots.get(level(2)),
            Some(SlotPair { current: 1, max: 1 })
        );
    }

    #[tokio::test]
    async fn test_add_spells_writes_only_new_entries() {
        let character = Character::new("Elara", "Wizard")
            .with_known_spell(KnownSpell::named("Fireball"));
        let id = character.id;
        let base = character.clone();
        let mut store = MockCharacterStorePort::new();
        store
            .expect_get()
            .returning(move |_, _| Ok(Some(character.clone())));
        store
            .expect_update()
            .times(1)
            .withf(|_, _, patch| match patch {
                CharacterPatch::KnownSpells(known) => {
                    known.len() == 2
                        && known.iter().filter(|k| k.matches("Fireball")).count() == 1
                        && known.iter().any(|k| k.matches("Shield"))
                }
                _ => false,
            })
            .returning(move |_, _, patch| Ok(applied(&base, &patch)));

        let selection =
            SelectionState::from_ids([SpellId::from("fireball"), SpellId::from("shield")]);
        let outcome = service(store)
            .add_spells(&session(), id, &selection)
            .await
            .unwrap();

        assert_eq!(outcome.added, vec![KnownSpell::with_level("Shield", level(1))]);
        assert_eq!(outcome.character.known_spells.len(), 2);
    }

    #[tokio::test]
    async fn test_add_already_known_spells_skips_store() {
        let character = Character::new("Elara", "Wizard")
            .with_known_spell(KnownSpell::named("Fireball"));
        let id = character.id;
        let mut store = MockCharacterStorePort::new();
        store
            .expect_get()
            .returning(move |_, _| Ok(Some(character.clone())));
        store.expect_update().never();

        let selection = SelectionState::from_ids([SpellId::from("fireball")]);
        let outcome = service(store)
            .add_spells(&session(), id, &selection)
            .await
            .unwrap();
        assert!(outcome.added.is_empty());
    }

    #[tokio::test]
    async fn test_add_empty_selection_is_rejected() {
        let store = MockCharacterStorePort::new();
        let result = service(store)
            .add_spells(&session(), CharacterId::new(), &SelectionState::default())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_character_is_not_found() {
        let mut store = MockCharacterStorePort::new();
        store.expect_get().returning(|_, _| Ok(None));

        let id = CharacterId::new();
        let result = service(store).get_character(&session(), id).await;
        assert!(matches!(result, Err(AppError::CharacterNotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_delete_removes_from_cache_after_store_call() {
        let character = wizard();
        let id = character.id;
        let listed = vec![character.clone()];
        let mut store = MockCharacterStorePort::new();
        store.expect_list().times(1).returning(move |_| Ok(listed.clone()));
        store
            .expect_delete()
            .with(mockall::predicate::always(), eq(id))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(store);
        service.list_characters(&session()).await.unwrap();
        service.delete_character(&session(), id).await.unwrap();

        assert!(service.list_characters(&session()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_character() {
        let character = wizard();
        let id = character.id;
        let listed = vec![character.clone()];
        let mut store = MockCharacterStorePort::new();
        store.expect_list().returning(move |_| Ok(listed.clone()));
        store
            .expect_delete()
            .returning(|_, _| Err(StoreError::Transport("connection reset".into())));

        let service = service(store);
        service.list_characters(&session()).await.unwrap();
        assert!(service.delete_character(&session(), id).await.is_err());
        assert_eq!(service.list_characters(&session()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_adjust_hit_points_clamps_to_max() {
        let character = wizard();
        let id = character.id;
        let base = character.clone();
        let mut store = MockCharacterStorePort::new();
        store
            .expect_get()
            .returning(move |_, _| Ok(Some(character.clone())));
        store
            .expect_update()
            .withf(|_, _, patch| *patch == CharacterPatch::CurrentHp(12))
            .returning(move |_, _, patch| Ok(applied(&base, &patch)));

        let updated = service(store)
            .adjust_hit_points(&session(), id, 20)
            .await
            .unwrap();
        assert_eq!(updated.current_hp, 12);
    }

    #[tokio::test]
    async fn test_share_updates_cached_token() {
        let character = wizard();
        let id = character.id;
        let listed = vec![character.clone()];
        let mut store = MockCharacterStorePort::new();
        store.expect_list().times(1).returning(move |_| Ok(listed.clone()));
        store.expect_issue_share_token().returning(|_, _| {
            Ok(ShareToken {
                token: "tok-123".into(),
                created_at: None,
            })
        });
        store.expect_revoke_share_token().returning(|_, _| Ok(()));

        let service = service(store);
        service.list_characters(&session()).await.unwrap();

        let token = service.share(&session(), id).await.unwrap();
        assert_eq!(token.token, "tok-123");
        let cached = service.list_characters(&session()).await.unwrap();
        assert_eq!(cached[0].share_token.as_deref(), Some("tok-123"));

        service.revoke_share(&session(), id).await.unwrap();
        let cached = service.list_characters(&session()).await.unwrap();
        assert!(cached[0].share_token.is_none());
    }

    #[tokio::test]
    async fn test_shared_character_by_token() {
        let character = wizard();
        let mut store = MockCharacterStorePort::new();
        store
            .expect_get_shared()
            .withf(|token| token == "tok-123")
            .returning(move |_| Ok(Some(character.clone())));

        let service = service(store);
        assert_eq!(service.shared_character(" tok-123 ").await.unwrap().name, "Elara");
        assert!(matches!(
            service.shared_character("  ").await,
            Err(AppError::SharedCharacterNotFound)
        ));
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_cache() {
        let mut store = MockCharacterStorePort::new();
        store
            .expect_list()
            .times(2)
            .returning(|session| {
                if session.access_token() == "access-token" {
                    Ok(vec![wizard()])
                } else {
                    Ok(vec![])
                }
            });

        let service = service(store);
        let other = Session::new("other-token").unwrap();
        assert_eq!(service.list_characters(&session()).await.unwrap().len(), 1);
        assert!(service.list_characters(&other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expired_list_is_refetched() {
        let mut store = MockCharacterStorePort::new();
        store.expect_list().times(2).returning(|_| Ok(vec![wizard()]));

        let service = service_with_ttl(store, Duration::ZERO);
        service.list_characters(&session()).await.unwrap();
        service.list_characters(&session()).await.unwrap();
    }

    #[tokio::test]
    async fn test_character_reads_go_to_store() {
        let character = wizard();
        let id = character.id;
        let listed = vec![character.clone()];
        let mut store = MockCharacterStorePort::new();
        store.expect_list().times(1).returning(move |_| Ok(listed.clone()));
        store
            .expect_get()
            .times(2)
            .returning(move |_, _| Ok(Some(character.clone())));

        let service = service(store);
        service.list_characters(&session()).await.unwrap();
        service.get_character(&session(), id).await.unwrap();
        service.grimoire(&session(), id).await.unwrap();
    }

    #[tokio::test]
    async fn test_revoked_session_loses_cached_characters() {
        let character = wizard();
        let id = character.id;
        let listed = vec![character.clone()];
        let mut store = MockCharacterStorePort::new();
        let mut calls = 0;
        store.expect_list().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(listed.clone())
            } else {
                Err(StoreError::Unauthorized)
            }
        });
        store
            .expect_get()
            .returning(|_, _| Err(StoreError::Unauthorized));

        let service = service(store);
        service.list_characters(&session()).await.unwrap();

        assert!(matches!(
            service.get_character(&session(), id).await,
            Err(AppError::Store(StoreError::Unauthorized))
        ));
        assert!(matches!(
            service.grimoire(&session(), id).await,
            Err(AppError::Store(StoreError::Unauthorized))
        ));
        // The rejected token no longer has a cached list to fall back on
        assert!(matches!(
            service.list_characters(&session()).await,
            Err(AppError::Store(StoreError::Unauthorized))
        ));
    }

    #[tokio::test]
    async fn test_character_gone_from_store_leaves_cache() {
        let character = wizard();
        let id = character.id;
        let listed = vec![character.clone()];
        let mut store = MockCharacterStorePort::new();
        store.expect_list().times(1).returning(move |_| Ok(listed.clone()));
        store.expect_get().returning(|_, _| Ok(None));

        let service = service(store);
        service.list_characters(&session()).await.unwrap();
        assert!(service.get_character(&session(), id).await.is_err());
        assert!(service.list_characters(&session()).await.unwrap().is_empty());
    }
}
