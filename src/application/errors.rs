//! Application error taxonomy
//!
//! Data absence (missing class, unresolved spell names) is not an error and
//! never reaches this type. What remains is what the user sees as an alert.

use crate::application::ports::outbound::StoreError;
use crate::domain::value_objects::{CharacterId, InvalidSpellLevel, Session};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No active session")]
    Unauthenticated,
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Shared character not found")]
    SharedCharacterNotFound,
    #[error(transparent)]
    InvalidSpellLevel(#[from] InvalidSpellLevel),
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("Character store error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// Short message suitable for a blocking alert
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated | Self::Store(StoreError::Unauthorized) => {
                "You are not signed in. Please sign in and try again.".into()
            }
            Self::CharacterNotFound(_) => "That character no longer exists.".into(),
            Self::SharedCharacterNotFound => {
                "This share link is invalid or has been revoked.".into()
            }
            Self::InvalidSpellLevel(e) => format!("Invalid spell level: {}", e.0),
            Self::Validation(message) => message.clone(),
            Self::Store(_) => "Something went wrong. Refresh and try again.".into(),
        }
    }
}

/// The single gate in front of every owner-scoped store call
pub fn require_session(session: Option<Session>) -> Result<Session, AppError> {
    session.ok_or(AppError::Unauthenticated)
}
