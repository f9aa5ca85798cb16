use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCardRequest {
    #[serde(rename = "nome")]
    pub holder_name: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "validade")]
    pub expiry: String,
    /// Checked for shape only, never persisted.
    pub cvv: String,
    #[serde(rename = "usuario_id")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CardCreated {
    pub mensagem: String,
    pub id: i64,
}
