// src/handlers/blacklist.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        db_utils::begin_owner_tx,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::blacklist::{BlacklistEntry, BlacklistSearch, CreateBlacklistPayload},
};

// GET /api/blacklist?search=
#[utoipa::path(
    get,
    path = "/api/blacklist",
    tag = "Blacklist",
    params(BlacklistSearch),
    responses(
        (status = 200, description = "Telefones bloqueados", body = Vec<BlacklistEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_blacklist(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<BlacklistSearch>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_owner_tx(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let entries = app_state.blacklist_service
        .list(&mut *tx, user.0.id, query.search.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(entries)))
}

// POST /api/blacklist
#[utoipa::path(
    post,
    path = "/api/blacklist",
    tag = "Blacklist",
    request_body = CreateBlacklistPayload,
    responses(
        (status = 201, description = "Telefone bloqueado", body = BlacklistEntry),
        (status = 409, description = "Telefone já bloqueado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_to_blacklist(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CreateBlacklistPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mut tx = begin_owner_tx(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let entry = app_state.blacklist_service
        .create(&mut *tx, user.0.id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(entry)))
}

// DELETE /api/blacklist/{id}
#[utoipa::path(
    delete,
    path = "/api/blacklist/{id}",
    tag = "Blacklist",
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 204, description = "Telefone desbloqueado"),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_from_blacklist(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(entry_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_owner_tx(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    app_state.blacklist_service
        .remove(&mut *tx, user.0.id, entry_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
