//! Static spell and class catalogs
//!
//! Two spell formats are understood: the baseline catalog shipped with the
//! app, and an alternate SRD-style dataset with nested `{ "name": ... }`
//! references. The alternate dataset wins when present and well-formed;
//! otherwise the baseline is used.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::application::services::ReferenceData;
use crate::domain::entities::{DndClass, Spell, SpellSchool, UnknownSpellSchool};
use crate::domain::value_objects::{SpellId, SpellLevel};
use crate::infrastructure::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to adapt {path}: {source}")]
    Adapt {
        path: PathBuf,
        #[source]
        source: AdaptError,
    },
    #[error("Alternate dataset has no spells")]
    EmptyAlternate,
}

/// Why an alternate dataset could not be adapted
#[derive(Debug, thiserror::Error)]
pub enum AdaptError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    School(#[from] UnknownSpellSchool),
}

// =============================================================================
// Baseline format
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BaselineSpell {
    id: SpellId,
    name: String,
    level: SpellLevel,
    school: SpellSchool,
    #[serde(default)]
    casting_time: String,
    #[serde(default)]
    range: String,
    #[serde(default)]
    classes: Vec<String>,
    #[serde(default)]
    subclasses: Vec<String>,
}

impl From<BaselineSpell> for Spell {
    fn from(raw: BaselineSpell) -> Self {
        let spell = Spell::new(raw.id, raw.name, raw.level, raw.school)
            .with_casting_time(raw.casting_time)
            .with_range(raw.range);
        let spell = raw.classes.into_iter().fold(spell, Spell::with_class);
        raw.subclasses.into_iter().fold(spell, Spell::with_subclass)
    }
}

/// A bare name or a `{ "name": ... }` object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NameRef {
    Name(String),
    Named { name: String },
}

impl NameRef {
    fn into_name(self) -> String {
        match self {
            Self::Name(name) | Self::Named { name } => name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawClass {
    name: String,
    #[serde(default)]
    subclasses: Option<Vec<NameRef>>,
    #[serde(default)]
    spellcasting: Option<serde_json::Value>,
}

impl From<RawClass> for DndClass {
    fn from(raw: RawClass) -> Self {
        // Either a flag or a details object; any non-false value means the class casts
        let spellcasting = match raw.spellcasting {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::Bool(flag)) => flag,
            Some(_) => true,
        };
        raw.subclasses
            .unwrap_or_default()
            .into_iter()
            .map(NameRef::into_name)
            .fold(
                DndClass::new(raw.name).with_spellcasting(spellcasting),
                DndClass::with_subclass,
            )
    }
}

pub fn parse_spells(json: &str) -> Result<Vec<Spell>, serde_json::Error> {
    let raw: Vec<BaselineSpell> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(Spell::from).collect())
}

pub fn parse_classes(json: &str) -> Result<Vec<DndClass>, serde_json::Error> {
    let raw: Vec<RawClass> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(DndClass::from).collect())
}

// =============================================================================
// Alternate (SRD-style) format
// =============================================================================

#[derive(Debug, Deserialize)]
struct AlternateSpell {
    index: String,
    name: String,
    level: SpellLevel,
    school: NameRef,
    #[serde(default)]
    casting_time: String,
    #[serde(default)]
    range: String,
    #[serde(default)]
    classes: Vec<NameRef>,
    #[serde(default)]
    subclasses: Vec<NameRef>,
}

impl AlternateSpell {
    fn adapt(self) -> Result<Spell, AdaptError> {
        let school: SpellSchool = self.school.into_name().parse()?;
        let spell = Spell::new(SpellId::new(self.index), self.name, self.level, school)
            .with_casting_time(self.casting_time)
            .with_range(self.range);
        let spell = self
            .classes
            .into_iter()
            .map(NameRef::into_name)
            .fold(spell, Spell::with_class);
        Ok(self
            .subclasses
            .into_iter()
            .map(NameRef::into_name)
            .fold(spell, Spell::with_subclass))
    }
}

/// Adapt an alternate dataset into catalog spells; any malformed entry fails
/// the whole dataset
pub fn adapt_alternate_spells(json: &str) -> Result<Vec<Spell>, AdaptError> {
    let raw: Vec<AlternateSpell> = serde_json::from_str(json)?;
    raw.into_iter().map(AlternateSpell::adapt).collect()
}

// =============================================================================
// Loading
// =============================================================================

async fn read(path: &Path) -> Result<String, ReferenceDataError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ReferenceDataError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_error(path: &Path) -> impl FnOnce(serde_json::Error) -> ReferenceDataError + '_ {
    move |source| ReferenceDataError::Parse {
        path: path.to_path_buf(),
        source,
    }
}

async fn load_alternate(path: &Path) -> Result<Vec<Spell>, ReferenceDataError> {
    let json = read(path).await?;
    let spells = adapt_alternate_spells(&json).map_err(|source| ReferenceDataError::Adapt {
        path: path.to_path_buf(),
        source,
    })?;
    if spells.is_empty() {
        return Err(ReferenceDataError::EmptyAlternate);
    }
    Ok(spells)
}

/// Load the class catalog and the preferred spell catalog
pub async fn load(config: &AppConfig) -> Result<ReferenceData, ReferenceDataError> {
    let classes = parse_classes(&read(&config.classes_path).await?)
        .map_err(parse_error(&config.classes_path))?;

    let alternate = match &config.alternate_spells_path {
        Some(path) => match load_alternate(path).await {
            Ok(spells) => {
                info!(path = %path.display(), count = spells.len(), "Using alternate spell dataset");
                Some(spells)
            }
            Err(e) => {
                warn!(error = %e, "Alternate spell dataset unusable, falling back to baseline");
                None
            }
        },
        None => None,
    };

    let spells = match alternate {
        Some(spells) => spells,
        None => parse_spells(&read(&config.spells_path).await?)
            .map_err(parse_error(&config.spells_path))?,
    };

    info!(
        spells = spells.len(),
        classes = classes.len(),
        "Reference data loaded"
    );
    Ok(ReferenceData { spells, classes })
}
