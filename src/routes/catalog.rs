use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::catalog::{
        AddPromotionRequest, CreateProductRequest, ProductsEnvelope, PromotedProduct,
        UpdatePromotionRequest, UpdateProductRequest,
    },
    error::AppResult,
    models::{Category, Product},
    response::{ErrorBody, MessageResponse},
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add_products", post(create_product))
        .route("/get_products", get(get_products))
        .route("/produtos", get(list_products))
        .route("/produtos/{id}", put(update_product).delete(delete_product))
        .route("/produtos/categoria/{categoria}", get(list_by_category))
        .route("/categorias", get(list_categories))
        .route("/promocao", get(list_promotions).post(add_promotion))
        .route("/promocao/{id}", put(update_promotion).delete(remove_promotion))
}

#[utoipa::path(
    post,
    path = "/add_products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 409, description = "Name already used", body = ErrorBody),
    ),
    tag = "Catalog"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    catalog_service::create_product(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Produto adicionado com sucesso")),
    ))
}

#[utoipa::path(
    get,
    path = "/get_products",
    responses((status = 200, description = "Catalog wrapped in an envelope", body = ProductsEnvelope)),
    tag = "Catalog"
)]
pub async fn get_products(State(state): State<AppState>) -> AppResult<Json<ProductsEnvelope>> {
    let produtos = catalog_service::list_products(&state).await?;
    Ok(Json(ProductsEnvelope { produtos }))
}

#[utoipa::path(
    get,
    path = "/produtos",
    responses((status = 200, description = "Every product", body = Vec<Product>)),
    tag = "Catalog"
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = catalog_service::list_products(&state).await?;
    Ok(Json(products))
}

#[utoipa::path(
    put,
    path = "/produtos/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 400, description = "Nothing to update", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Catalog"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<MessageResponse>> {
    catalog_service::update_product(&state, id, payload).await?;
    Ok(Json(MessageResponse::new("Produto atualizado com sucesso")))
}

#[utoipa::path(
    delete,
    path = "/produtos/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product removed", body = MessageResponse),
        (status = 400, description = "Product is referenced by an order", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Catalog"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    catalog_service::delete_product(&state, id).await?;
    Ok(Json(MessageResponse::new("Produto removido com sucesso")))
}

#[utoipa::path(
    get,
    path = "/produtos/categoria/{categoria}",
    params(("categoria" = String, Path, description = "Category name")),
    responses((status = 200, description = "Products of the category", body = Vec<Product>)),
    tag = "Catalog"
)]
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(categoria): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let products = catalog_service::list_by_category(&state, &categoria).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/categorias",
    responses((status = 200, description = "Distinct categories", body = Vec<Category>)),
    tag = "Catalog"
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = catalog_service::list_categories(&state).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/promocao",
    responses((status = 200, description = "Products on promotion", body = Vec<PromotedProduct>)),
    tag = "Promotions"
)]
pub async fn list_promotions(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PromotedProduct>>> {
    let products = catalog_service::list_promotions(&state).await?;
    Ok(Json(products))
}

#[utoipa::path(
    post,
    path = "/promocao",
    request_body = AddPromotionRequest,
    responses(
        (status = 201, description = "Product put on promotion", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Promotions"
)]
pub async fn add_promotion(
    State(state): State<AppState>,
    Json(payload): Json<AddPromotionRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    catalog_service::add_promotion(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Produto adicionado à promoção com sucesso")),
    ))
}

#[utoipa::path(
    put,
    path = "/promocao/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdatePromotionRequest,
    responses(
        (status = 200, description = "Promotional price updated", body = MessageResponse),
        (status = 400, description = "Missing price", body = ErrorBody),
        (status = 404, description = "Product is not on promotion", body = ErrorBody),
    ),
    tag = "Promotions"
)]
pub async fn update_promotion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePromotionRequest>,
) -> AppResult<Json<MessageResponse>> {
    catalog_service::update_promotion(&state, id, payload).await?;
    Ok(Json(MessageResponse::new("Produto em promoção atualizado")))
}

#[utoipa::path(
    delete,
    path = "/promocao/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Promotion removed", body = MessageResponse),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Promotions"
)]
pub async fn remove_promotion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    catalog_service::remove_promotion(&state, id).await?;
    Ok(Json(MessageResponse::new("Produto removido da promoção")))
}
