use crate::{
    db::DbPool,
    dto::{favorites::AddFavoriteRequest, require},
    error::{AppError, AppResult},
    models::FavoriteProduct,
};

pub async fn list_favorites(pool: &DbPool, user_id: i64) -> AppResult<Vec<FavoriteProduct>> {
    let products = sqlx::query_as::<_, FavoriteProduct>(
        r#"
        SELECT f.id AS favorite_id, p.id AS product_id, p.name, p.description,
               p.price, p.image, p.category, p.is_promotion
        FROM favorites f
        JOIN products p ON p.id = f.product_id
        WHERE f.user_id = $1
        ORDER BY f.created_at DESC, f.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Favoriting the same product twice returns the existing favorite.
pub async fn add_favorite(pool: &DbPool, payload: AddFavoriteRequest) -> AppResult<i64> {
    let user_id = require(payload.user_id, "Usuario_idUsuario")?;
    let product_id = require(payload.product_id, "Produtos_idProdutos")?;

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO favorites (user_id, product_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, product_id)
        DO UPDATE SET user_id = EXCLUDED.user_id
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub async fn remove_favorite(pool: &DbPool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM favorites WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("favorite"));
    }
    Ok(())
}
