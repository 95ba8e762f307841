// src/handlers/risk.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{
        db_utils::begin_owner_tx,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::risk::{RiskAssessment, RiskQuery},
    services::risk,
};

// GET /api/risk?phone=&orderId=
#[utoipa::path(
    get,
    path = "/api/risk",
    tag = "Orders",
    params(RiskQuery),
    responses(
        (status = 200, description = "Classificação do cliente: safe, warning, blocked ou skipped", body = RiskAssessment),
        (status = 404, description = "Pedido em edição não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn check_risk(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<RiskQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_owner_tx(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // Em edição, o telefone atual do pedido decide se a checagem é pulada
    let previous_phone = match query.order_id {
        Some(order_id) => {
            let order = app_state.order_service
                .get(&mut *tx, user.0.id, order_id)
                .await
                .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;
            Some(order.phone)
        }
        None => None,
    };

    let assessment = app_state.risk_service
        .check(&mut *tx, user.0.id, &query.phone, previous_phone.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    let assessment = risk::localize(assessment, &locale.0, &app_state.i18n_store);
    Ok((StatusCode::OK, Json(assessment)))
}
