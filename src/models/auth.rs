// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;
use validator::Validate;

// Representa a conta do lojista vinda do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "07701234567")]
    pub phone: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    #[schema(example = "متجر وارد")]
    pub store_name: String,

    // Flag de liberação do app (código de compra)
    pub is_unlocked: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro de uma nova conta
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(length(min = 10, max = 15, message = "invalid_phone"))]
    #[schema(example = "07701234567")]
    pub phone: String,

    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "متجر وارد")]
    pub store_name: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserPayload {
    #[validate(length(min = 10, max = 15, message = "invalid_phone"))]
    #[schema(example = "07701234567")]
    pub phone: String,

    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Código de compra para liberar o app
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnlockPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "WARED-XXXX-XXXX")]
    pub code: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

/// Os logins são feitos pelo telefone; guardamos só os dígitos.
pub fn normalize_login_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_phone_keeps_only_digits() {
        assert_eq!(normalize_login_phone(" 0770-123 4567 "), "07701234567");
        assert_eq!(normalize_login_phone("+964 770"), "964770");
    }

    #[test]
    fn register_payload_rejects_short_password() {
        let payload = RegisterUserPayload {
            phone: "07701234567".into(),
            password: "123".into(),
            store_name: "Store".into(),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
