use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddFavoriteRequest {
    #[serde(rename = "Usuario_idUsuario")]
    pub user_id: Option<i64>,
    #[serde(rename = "Produtos_idProdutos")]
    pub product_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteCreated {
    #[serde(rename = "idFavoritos")]
    pub id: i64,
}
