use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use serde_json::{Value, json};
use storefront_api::{
    config::AppConfig, db::create_lazy_pool, routes::create_app, state::AppState,
};
use tower::ServiceExt;

// The pool never dials out; every request below is rejected before touching it.
fn app() -> Router {
    let config = AppConfig::with_database_url("postgres://storefront@localhost:1/unused");
    let pool = create_lazy_pool(&config).expect("lazy pool");
    create_app(AppState::new(pool, config))
}

async fn send(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn health_reports_ok_with_request_id() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn status_update_without_status_is_rejected() {
    let (status, body) = send(Method::PUT, "/update_relatorios_pedidos/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "status is required" }));

    let (status, _) = send(
        Method::PUT,
        "/update_relatorios_pedidos/1",
        Some(json!({ "status": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn order_without_items_is_rejected() {
    let (status, body) = send(
        Method::POST,
        "/criar_pedido",
        Some(json!({
            "usuario_id": 1,
            "endereco": "Rua A, 1",
            "valor_total": 50.0,
            "pagamento": "pix",
            "items": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn order_amounts_must_fit_two_decimal_places() {
    let (status, body) = send(
        Method::POST,
        "/criar_pedido",
        Some(json!({
            "usuario_id": 1,
            "valor_total": 10.01,
            "pagamento": "pix",
            "items": [{ "id": 5, "quantity": 1, "price": 10.005 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "price for product 5 must have at most 2 decimal places");

    let (status, body) = send(
        Method::POST,
        "/criar_pedido",
        Some(json!({
            "usuario_id": 1,
            "valor_total": 10000000000.0,
            "pagamento": "pix",
            "items": [{ "id": 5, "quantity": 1, "price": 10.0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "valor_total is too large");

    let (status, body) = send(
        Method::POST,
        "/criar_pedido",
        Some(json!({
            "usuario_id": 1,
            "valor_total": 10.0,
            "valor_frete": -5.0,
            "pagamento": "pix",
            "items": [{ "id": 5, "quantity": 1, "price": 10.0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "valor_frete must not be negative");
}

#[tokio::test]
async fn cart_quantities_must_be_positive() {
    let (status, body) = send(
        Method::POST,
        "/add_carrinho",
        Some(json!({ "usuario_id": 1, "produto_id": 5, "quantidade": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "quantidade must be at least 1");

    let (status, _) = send(
        Method::POST,
        "/update_carrinho",
        Some(json!({ "idCarrinho_Produtos": 1, "quantidade": -2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/add_carrinho")
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn empty_product_update_is_rejected() {
    let (status, body) = send(Method::PUT, "/produtos/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no fields to update");
}

#[tokio::test]
async fn card_numbers_are_validated() {
    let (status, _) = send(
        Method::POST,
        "/cartao",
        Some(json!({ "nome": "ANA", "numero": "12", "validade": "12/29", "cvv": "123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_routes_return_json_404() {
    let (status, body) = send(Method::GET, "/nao_existe", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("/nao_existe"));
}
