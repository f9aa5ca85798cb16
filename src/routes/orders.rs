use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};

use crate::{
    dto::orders::{CreateOrderRequest, CreateOrderResponse, OrderWithItems, UpdateOrderStatusRequest},
    error::AppResult,
    models::Order,
    response::{ErrorBody, MensagemResponse},
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/criar_pedido", post(create_order))
        .route("/listar_pedidos/{user_id}", get(list_orders))
        .route("/relatorios_pedidos", get(list_all_orders))
        .route("/update_relatorios_pedidos/{id}", put(update_order_status))
}

#[utoipa::path(
    post,
    path = "/criar_pedido",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = CreateOrderResponse),
        (status = 400, description = "Invalid order", body = ErrorBody),
        (status = 500, description = "Order could not be stored", body = ErrorBody),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<CreateOrderResponse>> {
    let order_id = order_service::create_order(&state, payload).await?;
    Ok(Json(CreateOrderResponse {
        mensagem: "Pedido criado com sucesso".to_string(),
        pedido_id: order_id,
    }))
}

#[utoipa::path(
    get,
    path = "/listar_pedidos/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Orders of the user, newest first", body = Vec<OrderWithItems>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<OrderWithItems>>> {
    let orders = order_service::list_orders(&state, user_id).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    get,
    path = "/relatorios_pedidos",
    responses((status = 200, description = "Every order, newest first", body = Vec<Order>)),
    tag = "Orders"
)]
pub async fn list_all_orders(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    let orders = order_service::list_all_orders(&state).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    put,
    path = "/update_relatorios_pedidos/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = MensagemResponse),
        (status = 400, description = "Missing status", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<MensagemResponse>> {
    order_service::update_order_status(&state, id, payload).await?;
    Ok(Json(MensagemResponse::new("Status atualizado com sucesso")))
}
