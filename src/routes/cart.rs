use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};

use crate::{
    dto::cart::{AddToCartRequest, RemoveProductRequest, UpdateCartItemRequest},
    error::AppResult,
    models::CartLine,
    response::{ErrorBody, StatusResponse},
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get_carrinho/{user_id}", get(get_cart))
        .route("/add_carrinho", post(add_to_cart))
        .route("/update_carrinho", post(update_cart_item))
        .route("/remove_unidade_carrinho/{id}", delete(remove_line_item))
        .route("/remove_produto_carrinho", post(remove_product))
        .route("/limpar_carrinho/{user_id}", post(clear_cart))
}

#[utoipa::path(
    get,
    path = "/get_carrinho/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Lines of the user's open cart", body = Vec<CartLine>)
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<CartLine>>> {
    let lines = cart_service::get_cart(&state.pool, user_id).await?;
    Ok(Json(lines))
}

#[utoipa::path(
    post,
    path = "/add_carrinho",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Product added", body = StatusResponse),
        (status = 400, description = "Invalid quantity or unknown product", body = ErrorBody),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<StatusResponse>> {
    cart_service::add_to_cart(&state.pool, payload).await?;
    Ok(Json(StatusResponse::with_msg(
        "sucesso",
        "Produto adicionado ao carrinho",
    )))
}

#[utoipa::path(
    post,
    path = "/update_carrinho",
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated", body = StatusResponse),
        (status = 400, description = "Invalid quantity", body = ErrorBody),
    ),
    tag = "Cart"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> AppResult<Json<StatusResponse>> {
    cart_service::update_line_item_quantity(&state.pool, payload).await?;
    Ok(Json(StatusResponse::new("ok")))
}

#[utoipa::path(
    delete,
    path = "/remove_unidade_carrinho/{id}",
    params(("id" = i64, Path, description = "Cart line item ID")),
    responses((status = 200, description = "Line item removed", body = StatusResponse)),
    tag = "Cart"
)]
pub async fn remove_line_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StatusResponse>> {
    cart_service::remove_line_item(&state.pool, id).await?;
    Ok(Json(StatusResponse::new("sucesso")))
}

#[utoipa::path(
    post,
    path = "/remove_produto_carrinho",
    request_body = RemoveProductRequest,
    responses((status = 200, description = "Product removed", body = StatusResponse)),
    tag = "Cart"
)]
pub async fn remove_product(
    State(state): State<AppState>,
    Json(payload): Json<RemoveProductRequest>,
) -> AppResult<Json<StatusResponse>> {
    cart_service::remove_product_from_cart(&state.pool, payload).await?;
    Ok(Json(StatusResponse::new("ok")))
}

#[utoipa::path(
    post,
    path = "/limpar_carrinho/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    responses((status = 200, description = "Every cart of the user removed", body = StatusResponse)),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<StatusResponse>> {
    cart_service::clear_cart(&state.pool, user_id).await?;
    Ok(Json(StatusResponse::new("ok")))
}
