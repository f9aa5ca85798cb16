use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};

use crate::{
    dto::addresses::{AddressFields, CreateAddressRequest},
    error::AppResult,
    models::Address,
    response::{ErrorBody, MessageResponse},
    services::address_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get_endereco/{user_id}", get(list_addresses))
        .route("/endereco_usuario/{user_id}", get(list_addresses))
        .route("/add_endereco", post(add_address))
        .route("/update_endereco/{id}", post(update_address))
        .route("/delete_endereco/{id}", delete(delete_address))
}

#[utoipa::path(
    get,
    path = "/get_endereco/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    responses((status = 200, description = "Addresses of the user", body = Vec<Address>)),
    tag = "Addresses"
)]
pub async fn list_addresses(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Address>>> {
    let addresses = address_service::list_addresses(&state.pool, user_id).await?;
    Ok(Json(addresses))
}

#[utoipa::path(
    post,
    path = "/add_endereco",
    request_body = CreateAddressRequest,
    responses(
        (status = 200, description = "Address added", body = MessageResponse),
        (status = 400, description = "Missing field or unknown user", body = ErrorBody),
    ),
    tag = "Addresses"
)]
pub async fn add_address(
    State(state): State<AppState>,
    Json(payload): Json<CreateAddressRequest>,
) -> AppResult<Json<MessageResponse>> {
    address_service::add_address(&state.pool, payload).await?;
    Ok(Json(MessageResponse::new("Endereço adicionado com sucesso")))
}

#[utoipa::path(
    post,
    path = "/update_endereco/{id}",
    params(("id" = i64, Path, description = "Address ID")),
    request_body = AddressFields,
    responses(
        (status = 200, description = "Address updated", body = MessageResponse),
        (status = 400, description = "Nothing to update", body = ErrorBody),
        (status = 404, description = "Address not found", body = ErrorBody),
    ),
    tag = "Addresses"
)]
pub async fn update_address(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AddressFields>,
) -> AppResult<Json<MessageResponse>> {
    address_service::update_address(&state.pool, id, payload).await?;
    Ok(Json(MessageResponse::new("Endereço atualizado com sucesso")))
}

#[utoipa::path(
    delete,
    path = "/delete_endereco/{id}",
    params(("id" = i64, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Address removed", body = MessageResponse),
        (status = 404, description = "Address not found", body = ErrorBody),
    ),
    tag = "Addresses"
)]
pub async fn delete_address(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    address_service::delete_address(&state.pool, id).await?;
    Ok(Json(MessageResponse::new("Endereço removido com sucesso")))
}
