mod common;

use rust_decimal::Decimal;
use storefront_api::{
    dto::orders::{CreateOrderRequest, OrderItemRequest, UpdateOrderStatusRequest},
    error::AppError,
    services::order_service::{self, ORDER_PLACED},
    state::AppState,
};

fn order(user_id: i64, total: Decimal, items: Vec<OrderItemRequest>) -> CreateOrderRequest {
    CreateOrderRequest {
        user_id,
        address: Some("Av. Paulista, 1000".into()),
        total_value: total,
        freight_value: None,
        discount_value: None,
        coupon_code: None,
        payment_method: "pix".into(),
        note: None,
        items,
    }
}

async fn order_counts(state: &AppState, user_id: i64) -> anyhow::Result<(i64, i64)> {
    let (orders,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&state.pool)
        .await?;
    let (items,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM order_items oi JOIN orders o ON o.id = oi.order_id WHERE o.user_id = $1",
    )
    .bind(user_id)
    .fetch_one(&state.pool)
    .await?;
    Ok((orders, items))
}

#[tokio::test]
async fn placed_order_is_listed_with_its_lines() -> anyhow::Result<()> {
    let Some(state) = common::test_state().await? else {
        return Ok(());
    };
    let user = common::create_user(&state).await?;
    let product_id = common::create_product(&state, "Camiseta", Decimal::new(1000, 2)).await?;

    let order_id = order_service::create_order(
        &state,
        order(
            user.id,
            Decimal::new(5000, 2),
            vec![OrderItemRequest {
                product_id,
                quantity: 5,
                price: Decimal::new(1000, 2),
            }],
        ),
    )
    .await?;

    let orders = order_service::list_orders(&state, user.id).await?;
    assert_eq!(orders.len(), 1);
    let placed = &orders[0];
    assert_eq!(placed.order.id, order_id);
    assert_eq!(placed.order.status, ORDER_PLACED);
    assert_eq!(placed.order.total_value, Decimal::new(5000, 2));
    assert_eq!(placed.order.freight_value, Decimal::ZERO);
    assert_eq!(placed.items.len(), 1);
    assert!(placed.items[0].product_name.starts_with("Camiseta"));
    assert_eq!(placed.items[0].quantity, 5);
    assert_eq!(placed.items[0].unit_price, Decimal::new(1000, 2));

    let body = serde_json::to_value(placed)?;
    assert_eq!(body["idRelatorio_Pedido"], order_id);
    assert_eq!(body["items"][0]["quantidade"], 5);
    assert_eq!(body["items"][0]["preco_unitario"], 10.0);

    Ok(())
}

#[tokio::test]
async fn order_with_k_items_stores_k_lines() -> anyhow::Result<()> {
    let Some(state) = common::test_state().await? else {
        return Ok(());
    };
    let user = common::create_user(&state).await?;
    let a = common::create_product(&state, "Caneca", Decimal::new(2500, 2)).await?;
    let b = common::create_product(&state, "Adesivo", Decimal::new(300, 2)).await?;
    let c = common::create_product(&state, "Ecobag", Decimal::new(1200, 2)).await?;

    let items = [(a, 1, 2500), (b, 4, 300), (c, 2, 1200)]
        .into_iter()
        .map(|(product_id, quantity, cents)| OrderItemRequest {
            product_id,
            quantity,
            price: Decimal::new(cents, 2),
        })
        .collect();
    order_service::create_order(&state, order(user.id, Decimal::new(6100, 2), items)).await?;

    assert_eq!(order_counts(&state, user.id).await?, (1, 3));
    let orders = order_service::list_orders(&state, user.id).await?;
    assert_eq!(orders[0].items.len(), 3);

    Ok(())
}

#[tokio::test]
async fn failing_line_rolls_back_the_whole_order() -> anyhow::Result<()> {
    let Some(state) = common::test_state().await? else {
        return Ok(());
    };
    let user = common::create_user(&state).await?;
    let product_id = common::create_product(&state, "Moletom", Decimal::new(9000, 2)).await?;

    let result = order_service::create_order(
        &state,
        order(
            user.id,
            Decimal::new(9000, 2),
            vec![
                OrderItemRequest {
                    product_id,
                    quantity: 1,
                    price: Decimal::new(9000, 2),
                },
                // Second line references a product that does not exist.
                OrderItemRequest {
                    product_id: i64::MAX,
                    quantity: 1,
                    price: Decimal::ONE,
                },
            ],
        ),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(order_counts(&state, user.id).await?, (0, 0));

    Ok(())
}

#[tokio::test]
async fn orders_are_listed_newest_first() -> anyhow::Result<()> {
    let Some(state) = common::test_state().await? else {
        return Ok(());
    };
    let user = common::create_user(&state).await?;
    let product_id = common::create_product(&state, "Caneca", Decimal::new(1000, 2)).await?;
    let line = || OrderItemRequest {
        product_id,
        quantity: 1,
        price: Decimal::new(1000, 2),
    };

    let first = order_service::create_order(&state, order(user.id, Decimal::new(1000, 2), vec![line()])).await?;
    let second = order_service::create_order(&state, order(user.id, Decimal::new(1000, 2), vec![line()])).await?;

    let mine: Vec<i64> = order_service::list_orders(&state, user.id)
        .await?
        .iter()
        .map(|o| o.order.id)
        .collect();
    assert_eq!(mine, vec![second, first]);

    let all = order_service::list_all_orders(&state).await?;
    let pos_first = all.iter().position(|o| o.id == first).unwrap();
    let pos_second = all.iter().position(|o| o.id == second).unwrap();
    assert!(pos_second < pos_first);

    Ok(())
}

#[tokio::test]
async fn status_updates_accept_free_text() -> anyhow::Result<()> {
    let Some(state) = common::test_state().await? else {
        return Ok(());
    };
    let user = common::create_user(&state).await?;
    let product_id = common::create_product(&state, "Adesivo", Decimal::new(500, 2)).await?;

    let order_id = order_service::create_order(
        &state,
        order(
            user.id,
            Decimal::new(500, 2),
            vec![OrderItemRequest {
                product_id,
                quantity: 1,
                price: Decimal::new(500, 2),
            }],
        ),
    )
    .await?;

    let updated = order_service::update_order_status(
        &state,
        order_id,
        UpdateOrderStatusRequest {
            status: Some("Enviado".into()),
        },
    )
    .await?;
    assert_eq!(updated.status, "Enviado");
    assert!(updated.status_changed_at >= updated.created_at);

    let missing = order_service::update_order_status(
        &state,
        order_id,
        UpdateOrderStatusRequest { status: None },
    )
    .await
    .unwrap_err();
    assert!(matches!(missing, AppError::BadRequest(_)));

    let unknown = order_service::update_order_status(
        &state,
        i64::MAX,
        UpdateOrderStatusRequest {
            status: Some("Entregue".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(unknown, AppError::NotFound(_)));

    Ok(())
}
