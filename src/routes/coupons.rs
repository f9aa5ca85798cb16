use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::coupons::{CouponForm, CouponsEnvelope, ValidateCouponRequest},
    error::AppResult,
    models::Coupon,
    response::{ErrorBody, MessageResponse},
    services::coupon_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cupons", get(list_coupons).post(create_coupon))
        .route("/cupons/{id}", put(update_coupon).delete(delete_coupon))
        .route("/validar_cupom", post(validate_coupon))
}

#[utoipa::path(
    get,
    path = "/cupons",
    responses((status = 200, description = "Every coupon", body = CouponsEnvelope)),
    tag = "Coupons"
)]
pub async fn list_coupons(State(state): State<AppState>) -> AppResult<Json<CouponsEnvelope>> {
    let cupons = coupon_service::list_coupons(&state).await?;
    Ok(Json(CouponsEnvelope { cupons }))
}

#[utoipa::path(
    post,
    path = "/cupons",
    request_body = CouponForm,
    responses(
        (status = 201, description = "Coupon created", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 409, description = "Code already used", body = ErrorBody),
    ),
    tag = "Coupons"
)]
pub async fn create_coupon(
    State(state): State<AppState>,
    Json(payload): Json<CouponForm>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    coupon_service::create_coupon(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Cupom adicionado com sucesso")),
    ))
}

#[utoipa::path(
    put,
    path = "/cupons/{id}",
    params(("id" = i64, Path, description = "Coupon ID")),
    request_body = CouponForm,
    responses(
        (status = 200, description = "Coupon updated", body = MessageResponse),
        (status = 400, description = "Nothing to update", body = ErrorBody),
        (status = 404, description = "Coupon not found", body = ErrorBody),
    ),
    tag = "Coupons"
)]
pub async fn update_coupon(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CouponForm>,
) -> AppResult<Json<MessageResponse>> {
    coupon_service::update_coupon(&state, id, payload).await?;
    Ok(Json(MessageResponse::new("Cupom atualizado com sucesso")))
}

#[utoipa::path(
    delete,
    path = "/cupons/{id}",
    params(("id" = i64, Path, description = "Coupon ID")),
    responses(
        (status = 200, description = "Coupon removed", body = MessageResponse),
        (status = 404, description = "Coupon not found", body = ErrorBody),
    ),
    tag = "Coupons"
)]
pub async fn delete_coupon(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    coupon_service::delete_coupon(&state, id).await?;
    Ok(Json(MessageResponse::new("Cupom removido com sucesso")))
}

#[utoipa::path(
    post,
    path = "/validar_cupom",
    request_body = ValidateCouponRequest,
    responses(
        (status = 200, description = "Coupon can be used", body = Coupon),
        (status = 400, description = "Unknown, inactive or expired coupon", body = ErrorBody),
    ),
    tag = "Coupons"
)]
pub async fn validate_coupon(
    State(state): State<AppState>,
    Json(payload): Json<ValidateCouponRequest>,
) -> AppResult<Json<Coupon>> {
    let coupon = coupon_service::validate_coupon(&state, payload.code).await?;
    Ok(Json(coupon))
}
