use serde::Deserialize;
use utoipa::ToSchema;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    #[serde(rename = "usuario_id")]
    pub user_id: i64,
    #[serde(rename = "produto_id")]
    pub product_id: i64,
    #[serde(rename = "quantidade", default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    #[serde(rename = "idCarrinho_Produtos")]
    pub line_item_id: i64,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RemoveProductRequest {
    #[serde(rename = "carrinho_id")]
    pub cart_id: i64,
    #[serde(rename = "produto_id")]
    pub product_id: i64,
}
