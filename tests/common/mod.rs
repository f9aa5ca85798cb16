#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use storefront_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    services::account_service::hash_password,
    state::AppState,
};
use uuid::Uuid;

/// Connects to the test database, or returns `None` so the caller can skip.
pub async fn test_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run flow tests.");
            return Ok(None);
        }
    };

    let config = AppConfig::with_database_url(database_url);
    let pool = create_pool(&config).await?;
    run_migrations(&pool).await?;

    Ok(Some(AppState::new(pool, config)))
}

/// Short random tag so parallel tests never share rows.
pub fn unique() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Random eleven-digit CPF.
pub fn unique_cpf() -> String {
    let n = Uuid::new_v4().as_u128() % 100_000_000_000;
    format!("{n:011}")
}

pub fn birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 5, 20).unwrap()
}

pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub cpf: String,
    pub password: String,
}

pub async fn create_user(state: &AppState) -> anyhow::Result<TestUser> {
    let email = format!("user-{}@example.com", unique());
    let cpf = unique_cpf();
    let password = "senha123".to_string();

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO users (full_name, email, password_hash, cpf, phone, birth_date)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind("Cliente Teste")
    .bind(&email)
    .bind(hash_password(&password)?)
    .bind(&cpf)
    .bind("11988887777")
    .bind(birth_date())
    .fetch_one(&state.pool)
    .await?;

    Ok(TestUser {
        id,
        email,
        cpf,
        password,
    })
}

pub async fn create_product(state: &AppState, name: &str, price: Decimal) -> anyhow::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO products (name, description, price, image, stock)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(format!("{name} {}", unique()))
    .bind("Produto de teste")
    .bind(price)
    .bind("/img/teste.png")
    .bind(100)
    .fetch_one(&state.pool)
    .await?;

    Ok(id)
}
