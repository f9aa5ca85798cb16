use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderName, Request, Response, StatusCode, Uri},
    routing::get,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::{response::ErrorBody, state::AppState};

pub mod accounts;
pub mod addresses;
pub mod cards;
pub mod cart;
pub mod catalog;
pub mod coupons;
pub mod doc;
pub mod favorites;
pub mod health;
pub mod orders;

const MAX_IN_FLIGHT: usize = 100;
const MAX_BODY_BYTES: usize = 1024 * 1024;

// Paths are flat; the storefront clients call them at the root.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(cart::router())
        .merge(orders::router())
        .merge(accounts::router())
        .merge(addresses::router())
        .merge(catalog::router())
        .merge(coupons::router())
        .merge(favorites::router())
        .merge(cards::router())
}

/// The full application: API routes, docs and the middleware stack.
pub fn create_app(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_request(|request: &Request<_>, _span: &tracing::Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "request started"
            );
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                status = %response.status(),
                ms = %latency.as_millis(),
                "request finished"
            );
        });

    let request_timeout = state.config.request_timeout;

    Router::new()
        .route("/health", get(health::health_check))
        .route("/teste_db", get(health::db_check))
        .merge(create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(ConcurrencyLimitLayer::new(MAX_IN_FLIGHT))
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: format!("no route for {}", uri.path()),
        }),
    )
}
