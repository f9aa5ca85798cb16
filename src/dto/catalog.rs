use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "valor")]
    pub price: Option<Decimal>,
    #[serde(rename = "imagem")]
    pub image: Option<String>,
    #[serde(rename = "quantidade_estoque")]
    pub stock: Option<i32>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "administrador_id")]
    pub admin_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "valor")]
    pub price: Option<Decimal>,
    #[serde(rename = "imagem")]
    pub image: Option<String>,
    #[serde(rename = "quantidade_estoque")]
    pub stock: Option<i32>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductsEnvelope {
    pub produtos: Vec<Product>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddPromotionRequest {
    #[serde(rename = "Produto_idProduto")]
    pub product_id: Option<i64>,
    #[serde(rename = "preco_promocional")]
    pub promotional_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePromotionRequest {
    #[serde(rename = "preco_promocional")]
    pub promotional_price: Option<Decimal>,
}

/// A product currently on promotion.
#[derive(Debug, Serialize, ToSchema)]
pub struct PromotedProduct {
    #[serde(rename = "idProdutos")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "valor")]
    pub price: Decimal,
    #[serde(rename = "imagem")]
    pub image: String,
    pub is_promotion: bool,
}
