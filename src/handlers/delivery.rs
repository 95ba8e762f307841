// src/handlers/delivery.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{
        db_utils::begin_owner_tx,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::delivery::{GovernorateRate, ResolveRateQuery, ResolvedDeliveryCost, UpsertRatesPayload},
};

// GET /api/delivery-rates
#[utoipa::path(
    get,
    path = "/api/delivery-rates",
    tag = "Delivery",
    responses(
        (status = 200, description = "Tarifa por província (zero quando não cadastrada)", body = Vec<GovernorateRate>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_rates(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_owner_tx(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let rates = app_state.delivery_service
        .list_rates(&mut *tx, user.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rates)))
}

// PUT /api/delivery-rates
#[utoipa::path(
    put,
    path = "/api/delivery-rates",
    tag = "Delivery",
    request_body = UpsertRatesPayload,
    responses(
        (status = 200, description = "Tarifas salvas; devolve a tabela completa", body = Vec<GovernorateRate>),
        (status = 400, description = "Província desconhecida ou preço negativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn save_rates(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<UpsertRatesPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mut tx = begin_owner_tx(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let rates = app_state.delivery_service
        .save_rates(&mut *tx, user.0.id, &payload.rates)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rates)))
}

// GET /api/delivery-rates/resolve?governorate=&current=
#[utoipa::path(
    get,
    path = "/api/delivery-rates/resolve",
    tag = "Delivery",
    params(ResolveRateQuery),
    responses(
        (status = 200, description = "Valor do frete para o formulário de pedido", body = ResolvedDeliveryCost)
    ),
    security(("api_jwt" = []))
)]
pub async fn resolve_rate(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<ResolveRateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_owner_tx(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let resolved = app_state.delivery_service
        .resolve(&mut *tx, user.0.id, &query.governorate, query.current)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(resolved)))
}
