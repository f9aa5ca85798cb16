use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, OrderLine};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(rename = "usuario_id")]
    pub user_id: i64,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
    #[serde(rename = "valor_total")]
    pub total_value: Decimal,
    #[serde(rename = "valor_frete")]
    pub freight_value: Option<Decimal>,
    #[serde(rename = "valor_desconto")]
    pub discount_value: Option<Decimal>,
    #[serde(rename = "cupom_codigo")]
    pub coupon_code: Option<String>,
    #[serde(rename = "pagamento")]
    pub payment_method: String,
    #[serde(rename = "observacao")]
    pub note: Option<String>,
    pub items: Vec<OrderItemRequest>,
}

/// Line as submitted by the checkout screen; the price is taken as given.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    #[serde(rename = "id")]
    pub product_id: i64,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub mensagem: String,
    pub pedido_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderLine>,
}
