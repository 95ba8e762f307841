// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::common::i18n::DEFAULT_LOCALE;

const SUPPORTED: [&str; 2] = ["ar", "en"];

// Nosso extrator de idioma
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Locale {
    /// Lê o Accept-Language; qualquer idioma fora de ar/en cai no padrão (árabe).
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let lang = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                // "en-US" -> "en"; pega o primeiro (maior q) que suportamos
                accept_language::parse(header_str)
                    .into_iter()
                    .filter_map(|tag| tag.split('-').next().map(str::to_lowercase))
                    .find(|lang| SUPPORTED.contains(&lang.as_str()))
            })
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn locale_for(value: Option<&str>) -> String {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_str(v).unwrap());
        }
        Locale::from_headers(&headers).0
    }

    #[test]
    fn defaults_to_arabic() {
        assert_eq!(locale_for(None), "ar");
        assert_eq!(locale_for(Some("fr-FR")), "ar");
    }

    #[test]
    fn picks_english_when_preferred() {
        assert_eq!(locale_for(Some("en-US,en;q=0.9,ar;q=0.8")), "en");
        assert_eq!(locale_for(Some("ar-IQ,en;q=0.5")), "ar");
    }
}
