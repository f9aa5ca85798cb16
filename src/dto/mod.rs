use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::error::{AppError, AppResult};

pub mod accounts;
pub mod addresses;
pub mod cards;
pub mod cart;
pub mod catalog;
pub mod coupons;
pub mod favorites;
pub mod orders;

/// Unwraps a required field, rejecting absent values and blank strings.
pub fn require_text(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("{field} is required"))),
    }
}

pub fn require<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

/// Money columns are `NUMERIC(12, 2)`.
const MONEY_SCALE: u32 = 2;
// 10^10
const MONEY_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// Rejects amounts a money column would round or refuse.
pub fn ensure_money(value: Decimal, field: &str) -> AppResult<()> {
    if value < Decimal::ZERO {
        return Err(AppError::BadRequest(format!("{field} must not be negative")));
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(AppError::BadRequest(format!(
            "{field} must have at most {MONEY_SCALE} decimal places"
        )));
    }
    if value >= MONEY_LIMIT {
        return Err(AppError::BadRequest(format!("{field} is too large")));
    }
    Ok(())
}

/// Accepts `true`/`false` as well as the `1`/`0` integers older clients send.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|flag| match flag {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text(Some("  ".into()), "nome").is_err());
        assert!(require_text(None, "nome").is_err());
        assert_eq!(require_text(Some("Ana".into()), "nome").unwrap(), "Ana");
    }

    #[test]
    fn money_must_fit_the_column() {
        assert!(ensure_money(Decimal::new(1999, 2), "valor").is_ok());
        assert!(ensure_money(Decimal::new(10500, 3), "valor").is_ok());
        assert!(ensure_money("-0.00".parse().unwrap(), "valor").is_ok());
        assert!(ensure_money(Decimal::new(9_999_999_999_99, 2), "valor").is_ok());

        assert!(ensure_money(Decimal::new(-1, 2), "valor").is_err());
        assert!(ensure_money(Decimal::new(10005, 3), "valor").is_err());
        assert!(ensure_money(Decimal::new(10_000_000_000, 0), "valor").is_err());
    }

    #[test]
    fn money_limit_is_ten_billion() {
        assert_eq!(MONEY_LIMIT, Decimal::new(10_000_000_000, 0));
    }

    #[test]
    fn flag_accepts_ints_and_bools() {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default, deserialize_with = "deserialize_flag")]
            ativo: Option<bool>,
        }

        let body: Body = serde_json::from_str(r#"{"ativo": 0}"#).unwrap();
        assert_eq!(body.ativo, Some(false));
        let body: Body = serde_json::from_str(r#"{"ativo": true}"#).unwrap();
        assert_eq!(body.ativo, Some(true));
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.ativo, None);
    }
}
