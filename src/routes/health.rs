use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, response::ErrorBody, state::AppState};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DbCheck {
    pub status: String,
    pub database: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = HealthData),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthData> {
    Json(HealthData {
        status: "ok".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/teste_db",
    responses(
        (status = 200, description = "Database reachable", body = DbCheck),
        (status = 500, description = "Database unreachable", body = ErrorBody),
    ),
    tag = "Health"
)]
pub async fn db_check(State(state): State<AppState>) -> AppResult<Json<DbCheck>> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;
    Ok(Json(DbCheck {
        status: "ok".to_string(),
        database: "connected".to_string(),
    }))
}
