// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Nosso tipo de erro interno. Os handlers convertem para ApiError na borda.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Telefone já cadastrado")]
    PhoneAlreadyRegistered,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Conta ainda não liberada")]
    AccessLocked,

    #[error("Código de compra inválido")]
    InvalidAccessCode,

    #[error("Cliente na lista negra: {reason}")]
    CustomerBlocked { reason: String },

    #[error("Telefone já está na lista negra")]
    AlreadyBlacklisted,

    #[error("{0} não encontrado")]
    ResourceNotFound(&'static str),

    #[error("Província desconhecida: {0}")]
    UnknownGovernorate(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // `anyhow::Error` guarda o contexto de falhas inesperadas (ex: JoinError)
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O que o cliente recebe: status + mensagem traduzida + código estável.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub code: &'static str,
    pub details: Option<HashMap<String, Vec<String>>>,
}

#[derive(Serialize)]
struct ApiErrorBody<'a> {
    error: &'a str,
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a HashMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: &self.error,
            code: self.code,
            details: self.details.as_ref(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl ApiError {
    fn simple(status: StatusCode, code: &'static str, error: String) -> Self {
        Self { status, error, code, details: None }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidAccessCode
            | AppError::UnknownGovernorate(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::AccessLocked | AppError::CustomerBlocked { .. } => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AppError::PhoneAlreadyRegistered | AppError::AlreadyBlacklisted => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro interno na resposta traduzida para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        let status = self.status();

        match self {
            // Devolve todos os campos inválidos, cada mensagem já traduzida
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            let key = e.message.as_deref().unwrap_or(&e.code);
                            i18n.translate(lang, key)
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status,
                    error: i18n.translate(lang, "validation_failed"),
                    code: "validation_failed",
                    details: Some(details),
                }
            }
            AppError::PhoneAlreadyRegistered => {
                ApiError::simple(status, "phone_already_registered", i18n.translate(lang, "phone_already_registered"))
            }
            AppError::InvalidCredentials => {
                ApiError::simple(status, "invalid_credentials", i18n.translate(lang, "invalid_credentials"))
            }
            AppError::InvalidToken => {
                ApiError::simple(status, "invalid_token", i18n.translate(lang, "invalid_token"))
            }
            AppError::UserNotFound => {
                ApiError::simple(status, "user_not_found", i18n.translate(lang, "user_not_found"))
            }
            AppError::AccessLocked => {
                ApiError::simple(status, "access_locked", i18n.translate(lang, "access_locked"))
            }
            AppError::InvalidAccessCode => {
                ApiError::simple(status, "invalid_access_code", i18n.translate(lang, "invalid_access_code"))
            }
            AppError::CustomerBlocked { reason } => ApiError::simple(
                status,
                "customer_blocked",
                i18n.render(lang, "customer_blocked", &[("reason", reason.as_str())]),
            ),
            AppError::AlreadyBlacklisted => {
                ApiError::simple(status, "already_blacklisted", i18n.translate(lang, "already_blacklisted"))
            }
            AppError::ResourceNotFound(entity) => ApiError::simple(
                status,
                "not_found",
                i18n.render(lang, "not_found", &[("entity", entity)]),
            ),
            AppError::UnknownGovernorate(name) => ApiError::simple(
                status,
                "unknown_governorate",
                i18n.render(lang, "unknown_governorate", &[("governorate", name.as_str())]),
            ),

            // Banco, bcrypt, JWT e afins viram 500; o detalhe fica só no log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError::simple(status, "internal_error", i18n.translate(lang, "internal_error"))
            }
        }
    }
}

// Para extratores e middlewares que rejeitam sem ter o Locale em mãos
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let locale = Locale(crate::common::i18n::DEFAULT_LOCALE.to_string());
        self.to_api_error(&locale, &I18nStore::new()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    fn en() -> Locale {
        Locale("en".to_string())
    }

    #[test]
    fn customer_blocked_is_forbidden_with_reason() {
        let store = I18nStore::new();
        let api = AppError::CustomerBlocked { reason: "fraud".into() }.to_api_error(&en(), &store);
        assert_eq!(api.status, StatusCode::FORBIDDEN);
        assert_eq!(api.code, "customer_blocked");
        assert_eq!(api.error, "This customer is blacklisted. Reason: fraud");
    }

    #[test]
    fn validation_errors_are_translated_per_field() {
        let mut errors = validator::ValidationErrors::new();
        let mut err = ValidationError::new("negative_amount");
        err.message = Some("negative_amount".into());
        errors.add("price", err);

        let api = AppError::from(errors).to_api_error(&en(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.unwrap();
        assert_eq!(details["price"], vec!["The amount cannot be negative.".to_string()]);
    }

    #[test]
    fn internal_failures_hide_details() {
        let api = AppError::from(anyhow::anyhow!("pool exploded"))
            .to_api_error(&Locale("ar".into()), &I18nStore::new());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("pool"));
        assert_eq!(api.code, "internal_error");
    }

    #[test]
    fn duplicates_are_conflicts() {
        assert_eq!(AppError::AlreadyBlacklisted.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::PhoneAlreadyRegistered.status(), StatusCode::CONFLICT);
    }
}
