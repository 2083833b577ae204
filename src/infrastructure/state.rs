//! Shared application state

use anyhow::Result;
use std::sync::Arc;

use crate::application::ports::outbound::CharacterStorePort;
use crate::application::services::{CharacterServiceImpl, ReferenceData, SpellCatalogService};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::reference_data;
use crate::infrastructure::store_client::HttpCharacterStore;

/// Shared application state
pub struct AppState {
    /// Read-only spell and class catalogs
    pub spell_catalog: Arc<SpellCatalogService>,
    pub character_service: CharacterServiceImpl,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let data = reference_data::load(config).await?;
        let store = HttpCharacterStore::new(config)?;
        Ok(Self::with_store(config, data, Arc::new(store)))
    }

    /// Build state around an existing character store
    pub fn with_store(
        config: &AppConfig,
        data: ReferenceData,
        store: Arc<dyn CharacterStorePort>,
    ) -> Self {
        let spell_catalog = Arc::new(SpellCatalogService::new(data));
        let character_service = CharacterServiceImpl::new(
            store,
            spell_catalog.clone(),
            config.cache_capacity,
            config.cache_ttl(),
        );

        Self {
            spell_catalog,
            character_service,
        }
    }
}
