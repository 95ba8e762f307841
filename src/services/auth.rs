// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{normalize_login_phone, Claims, User},
};

const TOKEN_TTL_DAYS: i64 = 7;

/// Códigos de compra comparados sem espaços e em maiúsculas.
pub fn normalize_access_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    access_codes: Arc<Vec<String>>,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, access_codes: Vec<String>) -> Self {
        let access_codes = access_codes.iter().map(|c| normalize_access_code(c)).collect();
        Self { user_repo, jwt_secret, access_codes: Arc::new(access_codes) }
    }

    pub async fn register_user(&self, phone: &str, password: &str, store_name: &str) -> Result<String, AppError> {
        // 1. Hashing fora do runtime async
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))?
            ?;

        // 2. Cria a conta (telefone duplicado vira PhoneAlreadyRegistered no repo)
        let phone = normalize_login_phone(phone);
        let new_user = self
            .user_repo
            .create_user(self.user_repo.pool(), &phone, &hashed_password, store_name.trim())
            .await?;

        tracing::info!("👤 Nova conta registrada: {}", new_user.id);

        // 3. Gera o token
        self.create_token(new_user.id)
    }

    pub async fn login_user(&self, phone: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_phone(&normalize_login_phone(phone))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
        ?;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = self.decode_claims(token)?;

        self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// Libera o app se o código estiver na lista configurada.
    pub async fn unlock(&self, user: &User, code: &str) -> Result<User, AppError> {
        if user.is_unlocked {
            return Ok(user.clone());
        }

        if !self.accepts_code(code) {
            tracing::warn!("🔒 Código de compra inválido para {}", user.id);
            return Err(AppError::InvalidAccessCode);
        }

        let user = self.user_repo.set_unlocked(user.id).await?;
        tracing::info!("🔓 App liberado para {}", user.id);
        Ok(user)
    }

    pub fn accepts_code(&self, code: &str) -> bool {
        let code = normalize_access_code(code);
        !code.is_empty() && self.access_codes.iter().any(|c| *c == code)
    }

    pub fn decode_claims(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    pub fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        // Usa '?' para um tratamento de erro mais limpo
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn service(codes: &[&str]) -> AuthService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        AuthService::new(
            UserRepository::new(pool),
            "test-secret".into(),
            codes.iter().map(|c| c.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn token_round_trips_subject() {
        let auth = service(&[]);
        let user_id = Uuid::new_v4();
        let token = auth.create_token(user_id).unwrap();
        assert_eq!(auth.decode_claims(&token).unwrap().sub, user_id);
    }

    #[tokio::test]
    async fn foreign_token_is_rejected() {
        let auth = service(&[]);
        let token = auth.create_token(Uuid::new_v4()).unwrap();

        let other = AuthService { jwt_secret: "another".into(), ..service(&[]) };
        assert!(matches!(other.decode_claims(&token), Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn access_codes_ignore_case_and_spaces() {
        let auth = service(&["WARED-2024", " vip "]);
        assert!(auth.accepts_code(" wared-2024 "));
        assert!(auth.accepts_code("VIP"));
        assert!(!auth.accepts_code("WARED"));
        assert!(!auth.accepts_code("   "));
    }
}
