use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct User {
    #[serde(rename = "idUsuario")]
    pub id: i64,
    #[serde(rename = "nome_social")]
    pub social_name: Option<String>,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    pub email: String,
    pub cpf: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "data_nascimento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "data_cadastro")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "data_ultimo_acesso")]
    pub last_access_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct Address {
    #[serde(rename = "idEndereco_usuario")]
    pub id: i64,
    #[serde(rename = "Usuario_idUsuario")]
    pub user_id: i64,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "cep")]
    pub zip_code: String,
    #[serde(rename = "complemento")]
    pub complement: Option<String>,
    #[serde(rename = "referencia")]
    pub reference: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct Product {
    #[serde(rename = "idProdutos")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub price: Decimal,
    #[serde(rename = "imagem")]
    pub image: String,
    #[serde(rename = "quantidade_estoque")]
    pub stock: i32,
    #[serde(rename = "categoria")]
    pub category: String,
    pub is_promotion: bool,
    #[serde(rename = "data_cadastro")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Coupon {
    #[serde(rename = "idCupom")]
    pub id: i64,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "desconto")]
    pub discount: Decimal,
    #[serde(rename = "tipo_desconto")]
    pub discount_type: String,
    #[serde(rename = "data_validade")]
    pub valid_until: NaiveDate,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "Administrador_idAdministrador")]
    pub admin_id: Option<i64>,
    #[serde(rename = "data_criacao")]
    pub created_at: DateTime<Utc>,
}

/// A favorited product as shown in the user's wish list.
#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct FavoriteProduct {
    #[serde(rename = "idFavoritos")]
    pub favorite_id: i64,
    #[serde(rename = "idProdutos")]
    pub product_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub price: Decimal,
    #[serde(rename = "imagem")]
    pub image: String,
    #[serde(rename = "categoria")]
    pub category: String,
    pub is_promotion: bool,
}

/// One row of `GET /get_carrinho/{userId}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct CartLine {
    pub id: i64,
    #[serde(rename = "carrinho_id")]
    pub cart_id: i64,
    #[serde(rename = "produto_id")]
    pub product_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub price: Decimal,
    #[serde(rename = "imagem")]
    pub image: String,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    #[serde(rename = "idRelatorio_Pedido")]
    pub id: i64,
    #[serde(rename = "Usuario_idUsuario")]
    pub user_id: i64,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
    #[serde(rename = "valor_total")]
    pub total_value: Decimal,
    #[serde(rename = "valor_frete")]
    pub freight_value: Decimal,
    #[serde(rename = "valor_desconto")]
    pub discount_value: Decimal,
    #[serde(rename = "cupom_codigo")]
    pub coupon_code: Option<String>,
    pub status: String,
    #[serde(rename = "tipo_pagamento")]
    pub payment_method: String,
    #[serde(rename = "observacao")]
    pub note: Option<String>,
    #[serde(rename = "data_pedido")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "data_status")]
    pub status_changed_at: DateTime<Utc>,
}

/// Order line as listed in a user's order history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    #[serde(rename = "nome")]
    pub product_name: String,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    #[serde(rename = "preco_unitario")]
    pub unit_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[serde(rename = "categoria")]
    pub category: String,
}
