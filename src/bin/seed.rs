use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    services::account_service::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config).await?;
    run_migrations(&pool).await?;

    let admin_id = ensure_admin(&pool, "Administrador", "admin@example.com", "admin123").await?;
    let user_id = ensure_user(&pool, "user@example.com", "user123").await?;
    seed_products(&pool, admin_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_admin(pool: &PgPool, name: &str, email: &str, password: &str) -> anyhow::Result<i64> {
    let password_hash = hash_password(password)?;

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO admins (name, email, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured admin {email}");
    Ok(id)
}

async fn ensure_user(pool: &PgPool, email: &str, password: &str) -> anyhow::Result<i64> {
    let password_hash = hash_password(password)?;
    let birth_date = NaiveDate::from_ymd_opt(1995, 6, 15)
        .ok_or_else(|| anyhow::anyhow!("invalid seed birth date"))?;

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO users (full_name, email, password_hash, cpf, phone, birth_date)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (email) DO UPDATE SET active = TRUE
        RETURNING id
        "#,
    )
    .bind("Cliente Exemplo")
    .bind(email)
    .bind(password_hash)
    .bind("12345678909")
    .bind("11999990000")
    .bind(birth_date)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email}");
    Ok(id)
}

async fn seed_products(pool: &PgPool, admin_id: i64) -> anyhow::Result<()> {
    let products = [
        ("Caneca Ferris", "Caneca de cerâmica 350ml", Decimal::new(4990, 2), 100, "cozinha"),
        ("Camiseta Rust", "Camiseta de algodão", Decimal::new(7990, 2), 50, "vestuario"),
        ("Adesivos", "Pacote com 10 adesivos", Decimal::new(1500, 2), 200, "acessorios"),
        ("Moletom", "Moletom com capuz", Decimal::new(18990, 2), 30, "vestuario"),
        ("Ecobag", "Sacola reutilizável", Decimal::new(1000, 2), 80, "acessorios"),
    ];

    for (name, description, price, stock, category) in products {
        sqlx::query(
            r#"
            INSERT INTO products (name, description, price, image, stock, category, created_by_admin_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(format!("/img/{}.png", name.to_lowercase().replace(' ', "-")))
        .bind(stock)
        .bind(category)
        .bind(admin_id)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
