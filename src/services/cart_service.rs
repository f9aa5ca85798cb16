use sea_orm::ActiveEnum;

use crate::{
    audit,
    db::DbPool,
    dto::cart::{AddToCartRequest, RemoveProductRequest, UpdateCartItemRequest},
    entity::carts::CartStatus,
    error::{AppError, AppResult},
    models::CartLine,
};

/// Line items of the user's open cart joined with product details.
/// A user without a cart simply has no lines.
pub async fn get_cart(pool: &DbPool, user_id: i64) -> AppResult<Vec<CartLine>> {
    let lines = sqlx::query_as::<_, CartLine>(
        r#"
        SELECT ci.id, ci.cart_id, p.id AS product_id, p.name, p.description,
               p.price, p.image, ci.quantity
        FROM cart_items ci
        JOIN carts c ON c.id = ci.cart_id
        JOIN products p ON p.id = ci.product_id
        WHERE c.user_id = $1 AND c.status = $2
        ORDER BY ci.id
        "#,
    )
    .bind(user_id)
    .bind(CartStatus::Open.to_value())
    .fetch_all(pool)
    .await?;

    Ok(lines)
}

/// Adds `quantity` units of a product to the user's open cart, creating the
/// cart on first use. Returns the line item id.
pub async fn add_to_cart(pool: &DbPool, payload: AddToCartRequest) -> AppResult<i64> {
    ensure_positive(payload.quantity)?;

    let mut tx = pool.begin().await?;

    let product_exist: Option<(i64,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
        .bind(payload.product_id)
        .fetch_optional(&mut *tx)
        .await?;
    if product_exist.is_none() {
        return Err(AppError::BadRequest("product not found".to_string()));
    }

    // The partial unique index turns find-or-create into one statement; the
    // no-op update locks the row so a concurrent removal waits for us.
    let (cart_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO carts (user_id, status)
        VALUES ($1, $2)
        ON CONFLICT (user_id) WHERE status = 'open'
        DO UPDATE SET status = EXCLUDED.status
        RETURNING id
        "#,
    )
    .bind(payload.user_id)
    .bind(CartStatus::Open.to_value())
    .fetch_one(&mut *tx)
    .await?;

    let (line_id, quantity): (i64, i32) = sqlx::query_as(
        r#"
        INSERT INTO cart_items (cart_id, product_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (cart_id, product_id)
        DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                      updated_at = NOW()
        RETURNING id, quantity
        "#,
    )
    .bind(cart_id)
    .bind(payload.product_id)
    .bind(payload.quantity)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(cart_id, line_id, quantity, "cart line upserted");
    audit::record(
        pool,
        Some(payload.user_id),
        "cart_add",
        "cart_items",
        serde_json::json!({
            "cart_id": cart_id,
            "product_id": payload.product_id,
            "quantity": payload.quantity,
        }),
    )
    .await;

    Ok(line_id)
}

/// Overwrites the quantity of a line item. Unknown ids are ignored.
pub async fn update_line_item_quantity(
    pool: &DbPool,
    payload: UpdateCartItemRequest,
) -> AppResult<()> {
    ensure_positive(payload.quantity)?;

    sqlx::query(
        r#"
        UPDATE cart_items
        SET quantity = $1, updated_at = NOW()
        WHERE id = $2
        "#,
    )
    .bind(payload.quantity)
    .bind(payload.line_item_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Deletes one line item; removing a missing line is a no-op.
pub async fn remove_line_item(pool: &DbPool, line_item_id: i64) -> AppResult<()> {
    sqlx::query("DELETE FROM cart_items WHERE id = $1")
        .bind(line_item_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Removes a product from a cart and deletes the cart once it is empty.
/// Returns `true` when the cart itself was deleted.
pub async fn remove_product_from_cart(
    pool: &DbPool,
    payload: RemoveProductRequest,
) -> AppResult<bool> {
    let mut tx = pool.begin().await?;

    let locked: Option<(i64, i64)> =
        sqlx::query_as("SELECT id, user_id FROM carts WHERE id = $1 FOR UPDATE")
            .bind(payload.cart_id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some((cart_id, user_id)) = locked else {
        return Ok(false);
    };

    sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
        .bind(cart_id)
        .bind(payload.product_id)
        .execute(&mut *tx)
        .await?;

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cart_items WHERE cart_id = $1")
        .bind(cart_id)
        .fetch_one(&mut *tx)
        .await?;

    let cart_deleted = remaining == 0;
    if cart_deleted {
        sqlx::query("DELETE FROM carts WHERE id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    audit::record(
        pool,
        Some(user_id),
        "cart_remove",
        "cart_items",
        serde_json::json!({
            "cart_id": cart_id,
            "product_id": payload.product_id,
            "cart_deleted": cart_deleted,
        }),
    )
    .await;

    Ok(cart_deleted)
}

/// Drops every cart of the user together with its lines.
pub async fn clear_cart(pool: &DbPool, user_id: i64) -> AppResult<u64> {
    let result = sqlx::query("DELETE FROM carts WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

fn ensure_positive(quantity: i32) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::BadRequest(
            "quantidade must be at least 1".to_string(),
        ));
    }
    Ok(())
}
