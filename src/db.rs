use anyhow::Result;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::{Encode, PgPool, Postgres, QueryBuilder, Type, postgres::PgPoolOptions};

use crate::config::AppConfig;

pub type DbPool = PgPool;
pub type OrmConn = DatabaseConnection;

/// Create the bounded connection pool shared by every request.
pub async fn create_pool(config: &AppConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Pool that only dials the database on first use.
pub fn create_lazy_pool(config: &AppConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect_lazy(&config.database_url)?;
    Ok(pool)
}

/// Wrap the sqlx pool in a SeaORM connection; both share the same connections.
pub fn create_orm_conn(pool: &DbPool) -> OrmConn {
    SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone())
}

/// Apply the SQL files in `migrations/` that have not run yet.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Builds `UPDATE <table> SET col = $n, ... WHERE <key> = $m` from optional
/// fields. Table and column names are `&'static str` so only names fixed in
/// the source can reach the SQL text; every value is bound.
pub struct PartialUpdate<'args> {
    builder: QueryBuilder<'args, Postgres>,
    assignments: usize,
}

impl<'args> PartialUpdate<'args> {
    pub fn new(table: &'static str) -> Self {
        let mut builder = QueryBuilder::new("UPDATE ");
        builder.push(table).push(" SET ");
        Self {
            builder,
            assignments: 0,
        }
    }

    pub fn set<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            if self.assignments > 0 {
                self.builder.push(", ");
            }
            self.builder.push(column).push(" = ").push_bind(value);
            self.assignments += 1;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments == 0
    }

    pub fn where_id(mut self, key: &'static str, id: i64) -> QueryBuilder<'args, Postgres> {
        self.builder.push(" WHERE ").push(key).push(" = ").push_bind(id);
        self.builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_binds_only_present_fields() {
        let mut update = PartialUpdate::new("products");
        update
            .set("name", Some("Caneca".to_string()))
            .set::<i32>("stock", None)
            .set("category", Some("cozinha".to_string()));
        assert!(!update.is_empty());

        let builder = update.where_id("id", 7);
        assert_eq!(
            builder.sql(),
            "UPDATE products SET name = $1, category = $2 WHERE id = $3"
        );
    }

    #[test]
    fn partial_update_without_fields_is_empty() {
        let mut update = PartialUpdate::new("coupons");
        update.set::<String>("code", None);
        assert!(update.is_empty());
    }
}
