// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::{
        db_utils::begin_owner_tx,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    // Importamos os models para referenciar no Swagger
    models::{
        campaigns::CampaignReport,
        dashboard::{AccountSnapshot, DashboardOverview, ProductReport},
    },
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cards financeiros e indicadores de pedidos", body = DashboardOverview),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "App não liberado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_overview(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_owner_tx(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let overview = app_state.dashboard_service
        .overview(&mut *tx, user.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(overview)))
}

// GET /api/dashboard/products
#[utoipa::path(
    get,
    path = "/api/dashboard/products",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Mais vendidos e campeões de devolução", body = ProductReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_products(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_owner_tx(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let report = app_state.dashboard_service
        .products(&mut *tx, user.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/dashboard/campaigns
#[utoipa::path(
    get,
    path = "/api/dashboard/campaigns",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Pedidos e receita por campanha ativa", body = CampaignReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_campaigns(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_owner_tx(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let report = app_state.dashboard_service
        .campaigns(&mut *tx, user.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/snapshot
#[utoipa::path(
    get,
    path = "/api/snapshot",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Pedidos, despesas, fornecedores, extrato e campanhas numa leitura só", body = AccountSnapshot)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_snapshot(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_owner_tx(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let snapshot = app_state.dashboard_service
        .snapshot(&mut *tx, user.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(snapshot)))
}
