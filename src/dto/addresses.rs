use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddressFields {
    #[serde(rename = "logradouro")]
    pub street: Option<String>,
    #[serde(rename = "numero")]
    pub number: Option<String>,
    #[serde(rename = "bairro")]
    pub district: Option<String>,
    #[serde(rename = "cidade")]
    pub city: Option<String>,
    #[serde(rename = "estado")]
    pub state: Option<String>,
    #[serde(rename = "cep")]
    pub zip_code: Option<String>,
    #[serde(rename = "complemento")]
    pub complement: Option<String>,
    #[serde(rename = "referencia")]
    pub reference: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAddressRequest {
    #[serde(rename = "Usuario_idUsuario")]
    pub user_id: i64,
    #[serde(flatten)]
    pub fields: AddressFields,
}
