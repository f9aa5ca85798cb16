use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::cards::{AddCardRequest, CardCreated},
    error::AppResult,
    response::ErrorBody,
    services::card_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/cartao", post(add_card))
}

#[utoipa::path(
    post,
    path = "/cartao",
    request_body = AddCardRequest,
    responses(
        (status = 200, description = "Card saved without number or CVV", body = CardCreated),
        (status = 400, description = "Malformed card data", body = ErrorBody),
    ),
    tag = "Cards"
)]
pub async fn add_card(
    State(state): State<AppState>,
    Json(payload): Json<AddCardRequest>,
) -> AppResult<Json<CardCreated>> {
    let id = card_service::add_card(&state.pool, payload).await?;
    Ok(Json(CardCreated {
        mensagem: "Cartão salvo com sucesso".to_string(),
        id,
    }))
}
