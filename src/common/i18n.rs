// src/common/i18n.rs

use std::{collections::HashMap, sync::Arc};

/// Idioma usado quando o cliente não manda Accept-Language (ou manda um que não temos).
pub const DEFAULT_LOCALE: &str = "ar";

// (chave, árabe, inglês)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("validation_failed", "حقل واحد أو أكثر غير صالح.", "One or more fields are invalid."),
    ("required", "هذا الحقل مطلوب.", "This field is required."),
    ("invalid_phone", "رقم الهاتف غير صحيح.", "The phone number is invalid."),
    ("password_too_short", "كلمة المرور يجب أن تكون 6 أحرف على الأقل.", "The password must have at least 6 characters."),
    ("negative_amount", "المبلغ لا يمكن أن يكون سالباً.", "The amount cannot be negative."),
    ("discount_exceeds_price", "الخصم لا يمكن أن يكون أكبر من السعر.", "The discount cannot be greater than the price."),
    ("phone_already_registered", "رقم الهاتف مسجل مسبقاً.", "This phone number is already registered."),
    ("invalid_credentials", "رقم الهاتف أو كلمة المرور غير صحيحة.", "Invalid phone number or password."),
    ("invalid_token", "رمز الدخول غير صالح أو مفقود.", "The authentication token is invalid or missing."),
    ("user_not_found", "الحساب غير موجود.", "Account not found."),
    ("access_locked", "هذا التطبيق محمي. يرجى إدخال كود الشراء لفتح النظام.", "This app is locked. Enter your purchase code to unlock it."),
    ("invalid_access_code", "كود الشراء غير صحيح، يرجى التأكد والمحاولة مرة أخرى.", "The purchase code is invalid. Please check it and try again."),
    ("customer_blocked", "هذا الزبون محظور! السبب: {reason}", "This customer is blacklisted. Reason: {reason}"),
    ("high_return_rate", "تحذير: هذا الزبون لديه نسبة راجع عالية ({returned} من {total} طلبات سابقة)", "Warning: this customer returned {returned} of {total} previous orders."),
    ("already_blacklisted", "هذا الرقم محظور بالفعل.", "This phone number is already blacklisted."),
    ("not_found", "العنصر المطلوب غير موجود.", "The requested {entity} was not found."),
    ("unknown_governorate", "المحافظة غير معروفة: {governorate}", "Unknown governorate: {governorate}"),
    ("internal_error", "حدث خطأ غير متوقع، يرجى المحاولة مرة أخرى.", "An unexpected error occurred. Please try again."),
];

type Catalog = HashMap<&'static str, &'static str>;

/// Catálogo de mensagens para o usuário: idioma -> chave -> texto.
#[derive(Clone)]
pub struct I18nStore {
    messages: Arc<HashMap<&'static str, Catalog>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

impl I18nStore {
    pub fn new() -> Self {
        let mut ar = Catalog::with_capacity(MESSAGES.len());
        let mut en = Catalog::with_capacity(MESSAGES.len());
        for (key, ar_text, en_text) in MESSAGES {
            ar.insert(*key, *ar_text);
            en.insert(*key, *en_text);
        }

        let mut messages = HashMap::new();
        messages.insert("ar", ar);
        messages.insert("en", en);
        Self { messages: Arc::new(messages) }
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&'static str> {
        self.messages.get(lang).and_then(|catalog| catalog.get(key)).copied()
    }

    /// Busca a mensagem no idioma pedido, cai no idioma padrão e, por fim, devolve a própria chave.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(DEFAULT_LOCALE, key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    /// Igual a `translate`, trocando os marcadores `{nome}` pelos valores.
    pub fn render(&self, lang: &str, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.translate(lang, key), |msg, (name, value)| {
            msg.replace(&format!("{{{}}}", name), value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_locale_then_key() {
        let store = I18nStore::new();
        assert_eq!(store.translate("fr", "required"), store.translate("ar", "required"));
        assert_eq!(store.translate("en", "no_such_key"), "no_such_key");
    }

    #[test]
    fn render_fills_placeholders() {
        let store = I18nStore::new();
        let msg = store.render("en", "high_return_rate", &[("returned", "2"), ("total", "3")]);
        assert_eq!(msg, "Warning: this customer returned 2 of 3 previous orders.");

        let msg = store.render("ar", "customer_blocked", &[("reason", "fraud")]);
        assert!(msg.contains("fraud"));
    }
}
