// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::User,
};

// Token assinado de uma conta que não existe mais é só um token inválido
fn token_rejection(err: AppError) -> AppError {
    match err {
        AppError::UserNotFound => AppError::InvalidToken,
        other => other,
    }
}

// ---
// Guardião 1: Token JWT
// ---
/// Valida o `Authorization: Bearer` e coloca o usuário nos "extensions" da requisição.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = Locale::from_headers(request.headers());

    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::InvalidToken)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .auth_service
        .validate_token(bearer.token())
        .await
        .map_err(token_rejection)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// ---
// Guardião 2: App liberado pelo código de compra
// ---
/// Precisa rodar depois do `auth_guard`.
pub async fn access_guard(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = Locale::from_headers(request.headers());

    let unlocked = request
        .extensions()
        .get::<User>()
        .map(|user| user.is_unlocked);

    match unlocked {
        Some(true) => Ok(next.run(request).await),
        Some(false) => Err(AppError::AccessLocked.to_api_error(&locale, &app_state.i18n_store)),
        None => Err(AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store)),
    }
}

// Extrator para obter o usuário autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn deleted_account_is_an_invalid_token() {
        let err = token_rejection(AppError::UserNotFound);
        assert!(matches!(err, AppError::InvalidToken));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        let err = token_rejection(AppError::ResourceNotFound("order"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
