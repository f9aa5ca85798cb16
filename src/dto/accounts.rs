use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;

/// Body of self sign-up and of the admin "add/edit user" screens.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserForm {
    #[serde(rename = "nome")]
    pub full_name: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "senha")]
    pub password: Option<String>,
    #[serde(rename = "data_nascimento")]
    pub birth_date: Option<NaiveDate>,
    pub cpf: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    #[serde(rename = "senha")]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse<T> {
    pub message: String,
    pub user: T,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoggedUser {
    #[serde(rename = "idUsuario")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "dataNascimento")]
    pub birth_date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoggedAdmin {
    #[serde(rename = "idAdministrador")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(rename = "nome_social")]
    pub social_name: Option<String>,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "data_nascimento")]
    pub birth_date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChangePasswordResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub cpf: Option<String>,
    #[serde(rename = "data_nascimento")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "nova_senha")]
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResetPasswordResponse {
    pub message: String,
    pub usuario: ResetUser,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResetUser {
    #[serde(rename = "nome")]
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserCount {
    pub quantidade: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientResponse {
    pub cliente: User,
}
