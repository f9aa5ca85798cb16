use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::{
    db::PartialUpdate,
    dto::{
        catalog::{
            AddPromotionRequest, CreateProductRequest, PromotedProduct, UpdatePromotionRequest,
            UpdateProductRequest,
        },
        ensure_money, require, require_text,
    },
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    models::{Category, Product},
    state::AppState,
};

pub const DEFAULT_CATEGORY: &str = "geral";

pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    let products = Products::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    Ok(products)
}

pub async fn list_by_category(state: &AppState, category: &str) -> AppResult<Vec<Product>> {
    let products = Products::find()
        .filter(Column::Category.eq(category))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    Ok(products)
}

/// Distinct non-empty categories in alphabetical order.
pub async fn list_categories(state: &AppState) -> AppResult<Vec<Category>> {
    let categories: Vec<String> = Products::find()
        .select_only()
        .column(Column::Category)
        .distinct()
        .filter(Column::Category.ne(""))
        .order_by_asc(Column::Category)
        .into_tuple()
        .all(&state.orm)
        .await?;

    Ok(categories
        .into_iter()
        .map(|category| Category { category })
        .collect())
}

pub async fn create_product(state: &AppState, payload: CreateProductRequest) -> AppResult<Product> {
    let price = require(payload.price, "valor")?;
    ensure_price(price)?;

    let category = payload
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let active = ActiveModel {
        id: NotSet,
        name: Set(require_text(payload.name, "nome")?),
        description: Set(require_text(payload.description, "descricao")?),
        price: Set(price),
        image: Set(require_text(payload.image, "imagem")?),
        stock: Set(require(payload.stock, "quantidade_estoque")?),
        category: Set(category),
        is_promotion: Set(false),
        created_by_admin_id: Set(payload.admin_id),
        created_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;

    tracing::info!(product_id = product.id, "product created");
    Ok(product_from_entity(product))
}

pub async fn update_product(
    state: &AppState,
    id: i64,
    payload: UpdateProductRequest,
) -> AppResult<()> {
    if let Some(price) = payload.price {
        ensure_price(price)?;
    }

    let mut update = PartialUpdate::new("products");
    update
        .set("name", payload.name)
        .set("description", payload.description)
        .set("price", payload.price)
        .set("image", payload.image)
        .set("stock", payload.stock)
        .set("category", payload.category);

    if update.is_empty() {
        return Err(AppError::BadRequest("no fields to update".into()));
    }

    let mut query = update.where_id("id", id);
    let result = query.build().execute(&state.pool).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("product"));
    }
    Ok(())
}

pub async fn delete_product(state: &AppState, id: i64) -> AppResult<()> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("product"));
    }
    Ok(())
}

pub async fn list_promotions(state: &AppState) -> AppResult<Vec<PromotedProduct>> {
    let products = Products::find()
        .filter(Column::IsPromotion.eq(true))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|p| PromotedProduct {
            id: p.id,
            name: p.name,
            description: p.description,
            category: p.category,
            price: p.price,
            image: p.image,
            is_promotion: p.is_promotion,
        })
        .collect();

    Ok(products)
}

/// Flags a product as promoted and replaces its price.
pub async fn add_promotion(state: &AppState, payload: AddPromotionRequest) -> AppResult<()> {
    let (product_id, price) = match (payload.product_id, payload.promotional_price) {
        (Some(id), Some(price)) => (id, price),
        _ => {
            return Err(AppError::BadRequest(
                "Produto_idProduto and preco_promocional are required".into(),
            ));
        }
    };
    ensure_price(price)?;

    let result = Products::update_many()
        .col_expr(Column::IsPromotion, Expr::value(true))
        .col_expr(Column::Price, Expr::value(price))
        .filter(Column::Id.eq(product_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("product"));
    }
    Ok(())
}

/// Changes the price of a product that is already on promotion.
pub async fn update_promotion(
    state: &AppState,
    id: i64,
    payload: UpdatePromotionRequest,
) -> AppResult<()> {
    let price = require(payload.promotional_price, "preco_promocional")?;
    ensure_price(price)?;

    let result = Products::update_many()
        .col_expr(Column::Price, Expr::value(price))
        .filter(Column::Id.eq(id))
        .filter(Column::IsPromotion.eq(true))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("promotion"));
    }
    Ok(())
}

/// Clears the promotion flag; the current price is kept.
pub async fn remove_promotion(state: &AppState, id: i64) -> AppResult<()> {
    let result = Products::update_many()
        .col_expr(Column::IsPromotion, Expr::value(false))
        .filter(Column::Id.eq(id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("product"));
    }
    Ok(())
}

fn ensure_price(price: Decimal) -> AppResult<()> {
    ensure_money(price, "valor")
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        image: model.image,
        stock: model.stock,
        category: model.category,
        is_promotion: model.is_promotion,
        created_at: model.created_at.with_timezone(&chrono::Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_prices_are_rejected() {
        assert!(ensure_price(Decimal::new(-1, 2)).is_err());
        assert!(ensure_price(Decimal::ZERO).is_ok());
        assert!(ensure_price(Decimal::new(10005, 3)).is_err());
    }
}
