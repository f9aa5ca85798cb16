use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    audit,
    dto::{
        ensure_money,
        orders::{CreateOrderRequest, OrderWithItems, UpdateOrderStatusRequest},
    },
    entity::{
        carts::{CartStatus, Column as CartCol, Entity as Carts},
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    models::{Order, OrderLine},
    state::AppState,
};

/// Status given to every freshly placed order.
pub const ORDER_PLACED: &str = "Realizado";

/// Records an order header and its lines in one transaction and deletes the
/// user's open cart. Unit prices are stored exactly as submitted.
pub async fn create_order(state: &AppState, payload: CreateOrderRequest) -> AppResult<i64> {
    validate_order(&payload)?;

    let txn = state.orm.begin().await?;

    let order = OrderActive {
        id: NotSet,
        user_id: Set(payload.user_id),
        address: Set(payload.address),
        total_value: Set(payload.total_value),
        freight_value: Set(payload.freight_value.unwrap_or(Decimal::ZERO)),
        discount_value: Set(payload.discount_value.unwrap_or(Decimal::ZERO)),
        coupon_code: Set(payload.coupon_code.filter(|c| !c.trim().is_empty())),
        status: Set(ORDER_PLACED.to_string()),
        payment_method: Set(payload.payment_method),
        note: Set(payload.note),
        created_at: NotSet,
        status_changed_at: NotSet,
    }
    .insert(&txn)
    .await?;

    for item in &payload.items {
        OrderItemActive {
            id: NotSet,
            order_id: Set(order.id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            unit_price: Set(item.price),
        }
        .insert(&txn)
        .await?;
    }

    // The order now holds the purchase; its lines go with the cart.
    let carts_removed = Carts::delete_many()
        .filter(CartCol::UserId.eq(order.user_id))
        .filter(CartCol::Status.eq(CartStatus::Open.to_value()))
        .exec(&txn)
        .await?
        .rows_affected;

    txn.commit().await?;

    tracing::info!(
        order_id = order.id,
        items = payload.items.len(),
        carts_removed,
        "order placed"
    );
    audit::record(
        &state.pool,
        Some(order.user_id),
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "items": payload.items.len() }),
    )
    .await;

    Ok(order.id)
}

/// A user's orders, newest first, each with its lines.
pub async fn list_orders(state: &AppState, user_id: i64) -> AppResult<Vec<OrderWithItems>> {
    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(user_id))
        .order_by_desc(OrderCol::Id)
        .all(&state.orm)
        .await?;

    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let mut lines: HashMap<i64, Vec<OrderLine>> = HashMap::new();
    if !ids.is_empty() {
        // One query for the lines of every listed order.
        let rows = OrderItems::find()
            .find_also_related(Products)
            .filter(OrderItemCol::OrderId.is_in(ids))
            .order_by_asc(OrderItemCol::Id)
            .all(&state.orm)
            .await?;

        for (item, product) in rows {
            lines.entry(item.order_id).or_default().push(OrderLine {
                product_name: product.map(|p| p.name).unwrap_or_default(),
                quantity: item.quantity,
                unit_price: item.unit_price,
            });
        }
    }

    Ok(orders
        .into_iter()
        .map(|model| {
            let items = lines.remove(&model.id).unwrap_or_default();
            OrderWithItems {
                order: order_from_entity(model),
                items,
            }
        })
        .collect())
}

/// Every order in the store, newest first.
pub async fn list_all_orders(state: &AppState) -> AppResult<Vec<Order>> {
    let orders = Orders::find()
        .order_by_desc(OrderCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    Ok(orders)
}

/// Sets a new status. Any non-blank text is accepted.
pub async fn update_order_status(
    state: &AppState,
    id: i64,
    payload: UpdateOrderStatusRequest,
) -> AppResult<Order> {
    let status = payload
        .status
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("status is required".into()))?;

    let existing = Orders::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound("order")),
    };

    let mut active: OrderActive = existing.into();
    active.status = Set(status);
    active.status_changed_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        None,
        "order_status_update",
        "orders",
        serde_json::json!({ "order_id": order.id, "status": order.status }),
    )
    .await;

    Ok(order_from_entity(order))
}

fn validate_order(payload: &CreateOrderRequest) -> AppResult<()> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("items must not be empty".into()));
    }
    if payload.payment_method.trim().is_empty() {
        return Err(AppError::BadRequest("pagamento is required".into()));
    }
    ensure_money(payload.total_value, "valor_total")?;
    if let Some(freight) = payload.freight_value {
        ensure_money(freight, "valor_frete")?;
    }
    if let Some(discount) = payload.discount_value {
        ensure_money(discount, "valor_desconto")?;
    }
    for item in &payload.items {
        if item.quantity < 1 {
            return Err(AppError::BadRequest(format!(
                "quantity for product {} must be at least 1",
                item.product_id
            )));
        }
        ensure_money(item.price, &format!("price for product {}", item.product_id))?;
    }
    Ok(())
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        address: model.address,
        total_value: model.total_value,
        freight_value: model.freight_value,
        discount_value: model.discount_value,
        coupon_code: model.coupon_code,
        status: model.status,
        payment_method: model.payment_method,
        note: model.note,
        created_at: model.created_at.with_timezone(&Utc),
        status_changed_at: model.status_changed_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::orders::OrderItemRequest;

    fn request(items: Vec<OrderItemRequest>) -> CreateOrderRequest {
        CreateOrderRequest {
            user_id: 1,
            address: Some("Rua A, 10".into()),
            total_value: Decimal::new(5000, 2),
            freight_value: None,
            discount_value: None,
            coupon_code: None,
            payment_method: "pix".into(),
            note: None,
            items,
        }
    }

    fn item(quantity: i32, price: Decimal) -> OrderItemRequest {
        OrderItemRequest {
            product_id: 5,
            quantity,
            price,
        }
    }

    #[test]
    fn accepts_a_well_formed_order() {
        assert!(validate_order(&request(vec![item(5, Decimal::new(1000, 2))])).is_ok());
    }

    #[test]
    fn rejects_empty_orders() {
        let err = validate_order(&request(vec![])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(validate_order(&request(vec![item(0, Decimal::ONE)])).is_err());
        assert!(validate_order(&request(vec![item(1, Decimal::NEGATIVE_ONE)])).is_err());
    }

    #[test]
    fn rejects_amounts_the_money_columns_would_change() {
        assert!(validate_order(&request(vec![item(1, Decimal::new(10005, 3))])).is_err());

        let mut req = request(vec![item(1, Decimal::ONE)]);
        req.total_value = Decimal::new(10_000_000_000, 0);
        assert!(validate_order(&req).is_err());

        let mut req = request(vec![item(1, Decimal::ONE)]);
        req.freight_value = Some(Decimal::new(-500, 2));
        assert!(validate_order(&req).is_err());

        let mut req = request(vec![item(1, Decimal::ONE)]);
        req.discount_value = Some(Decimal::new(-100, 2));
        assert!(validate_order(&req).is_err());
    }

    #[test]
    fn negative_zero_counts_as_zero() {
        let negative_zero: Decimal = "-0.00".parse().unwrap();
        let mut req = request(vec![item(1, negative_zero)]);
        req.total_value = negative_zero;
        req.discount_value = Some(negative_zero);
        assert!(validate_order(&req).is_ok());
    }

    #[test]
    fn rejects_blank_payment_method() {
        let mut req = request(vec![item(1, Decimal::ONE)]);
        req.payment_method = "  ".into();
        assert!(validate_order(&req).is_err());
    }
}
