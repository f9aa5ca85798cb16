use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::favorites::{AddFavoriteRequest, FavoriteCreated},
    error::AppResult,
    models::FavoriteProduct,
    response::{ErrorBody, MessageResponse},
    services::favorite_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favoritos", post(add_favorite))
        // GET takes a user id, DELETE a favorite id.
        .route("/favoritos/{id}", get(list_favorites).delete(remove_favorite))
}

#[utoipa::path(
    get,
    path = "/favoritos/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    responses((status = 200, description = "Favorited products, most recent first", body = Vec<FavoriteProduct>)),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<FavoriteProduct>>> {
    let favorites = favorite_service::list_favorites(&state.pool, user_id).await?;
    Ok(Json(favorites))
}

#[utoipa::path(
    post,
    path = "/favoritos",
    request_body = AddFavoriteRequest,
    responses(
        (status = 201, description = "Product favorited", body = FavoriteCreated),
        (status = 400, description = "Missing field or unknown product", body = ErrorBody),
    ),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(payload): Json<AddFavoriteRequest>,
) -> AppResult<(StatusCode, Json<FavoriteCreated>)> {
    let id = favorite_service::add_favorite(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(FavoriteCreated { id })))
}

#[utoipa::path(
    delete,
    path = "/favoritos/{id}",
    params(("id" = i64, Path, description = "Favorite ID")),
    responses(
        (status = 200, description = "Favorite removed", body = MessageResponse),
        (status = 404, description = "Favorite not found", body = ErrorBody),
    ),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    favorite_service::remove_favorite(&state.pool, id).await?;
    Ok(Json(MessageResponse::new("Favorito removido com sucesso")))
}
