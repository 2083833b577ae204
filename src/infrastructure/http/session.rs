//! Session extraction and error mapping for handlers

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use tracing::warn;

use crate::application::errors::{require_session, AppError};
use crate::application::ports::outbound::StoreError;
use crate::domain::value_objects::Session;

/// Extractor for handlers that act on the owner's behalf
///
/// Rejects with 401 before the handler runs when no bearer token is present.
pub struct RequireSession(pub Session);

impl<S: Send + Sync> FromRequestParts<S> for RequireSession {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(Session::from_authorization_header);

        require_session(session)
            .map(RequireSession)
            .map_err(error_response)
    }
}

/// Map an application error to a status and a user-facing message
pub fn error_response(error: AppError) -> (StatusCode, String) {
    let status = match &error {
        AppError::Unauthenticated | AppError::Store(StoreError::Unauthorized) => {
            StatusCode::UNAUTHORIZED
        }
        AppError::CharacterNotFound(_) | AppError::SharedCharacterNotFound => {
            StatusCode::NOT_FOUND
        }
        AppError::InvalidSpellLevel(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::Store(_) => StatusCode::BAD_GATEWAY,
    };
    if status == StatusCode::BAD_GATEWAY {
        warn!(error = %error, "Character store request failed");
    }
    (status, error.user_message())
}
