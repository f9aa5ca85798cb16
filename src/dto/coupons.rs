use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dto::deserialize_flag, models::Coupon};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CouponForm {
    #[serde(rename = "codigo")]
    pub code: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "desconto")]
    pub discount: Option<Decimal>,
    #[serde(rename = "tipo_desconto")]
    pub discount_type: Option<String>,
    #[serde(rename = "data_validade")]
    pub valid_until: Option<NaiveDate>,
    #[serde(rename = "ativo", default, deserialize_with = "deserialize_flag")]
    pub active: Option<bool>,
    #[serde(rename = "Administrador_idAdministrador")]
    pub admin_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CouponsEnvelope {
    pub cupons: Vec<Coupon>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateCouponRequest {
    #[serde(rename = "codigo")]
    pub code: Option<String>,
}
