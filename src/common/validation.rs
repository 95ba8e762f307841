// src/common/validation.rs

use rust_decimal::Decimal;
use validator::ValidationError;

/// Valores monetários informados pelo usuário nunca são negativos.
pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("negative_amount");
        err.message = Some("negative_amount".into());
        return Err(err);
    }
    Ok(())
}

/// Telefone com 10 a 15 caracteres depois de tirar os espaços das pontas (é assim que fica salvo).
pub fn phone_number(value: &str) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if !(10..=15).contains(&len) {
        let mut err = ValidationError::new("invalid_phone");
        err.message = Some("invalid_phone".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_positive_amounts_pass() {
        assert!(non_negative(&Decimal::ZERO).is_ok());
        assert!(non_negative(&Decimal::from(5000)).is_ok());
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = non_negative(&Decimal::from(-1)).unwrap_err();
        assert_eq!(err.code, "negative_amount");
    }

    #[test]
    fn phone_length_counts_the_trimmed_value() {
        assert!(phone_number("07701234567").is_ok());
        assert!(phone_number("  07701234567  ").is_ok());

        let err = phone_number("   0770000   ").unwrap_err();
        assert_eq!(err.code, "invalid_phone");
        assert!(phone_number("0770123456789012").is_err());
    }
}
