// src/handlers/tools.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::calculator::{ProfitInput, ProfitResult},
    services::calculator,
};

// POST /api/tools/profit-calculator (pública)
#[utoipa::path(
    post,
    path = "/api/tools/profit-calculator",
    tag = "Tools",
    request_body = ProfitInput,
    responses(
        (status = 200, description = "Custo final, lucro, margem e ROI", body = ProfitResult),
        (status = 400, description = "Valores negativos")
    )
)]
pub async fn profit_calculator(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ProfitInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(calculator::calculate(&payload))))
}
