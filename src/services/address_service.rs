use crate::{
    db::{DbPool, PartialUpdate},
    dto::{
        addresses::{AddressFields, CreateAddressRequest},
        require_text,
    },
    error::{AppError, AppResult},
    models::Address,
};

pub async fn list_addresses(pool: &DbPool, user_id: i64) -> AppResult<Vec<Address>> {
    let addresses = sqlx::query_as::<_, Address>(
        r#"
        SELECT id, user_id, street, number, district, city, state, zip_code, complement, reference
        FROM addresses
        WHERE user_id = $1
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(addresses)
}

pub async fn add_address(pool: &DbPool, payload: CreateAddressRequest) -> AppResult<i64> {
    let AddressFields {
        street,
        number,
        district,
        city,
        state,
        zip_code,
        complement,
        reference,
    } = payload.fields;

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO addresses (user_id, street, number, district, city, state, zip_code, complement, reference)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(payload.user_id)
    .bind(require_text(street, "logradouro")?)
    .bind(require_text(number, "numero")?)
    .bind(require_text(district, "bairro")?)
    .bind(require_text(city, "cidade")?)
    .bind(require_text(state, "estado")?)
    .bind(require_text(zip_code, "cep")?)
    .bind(complement)
    .bind(reference)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Updates the fields present in the body.
pub async fn update_address(pool: &DbPool, id: i64, fields: AddressFields) -> AppResult<()> {
    let mut update = PartialUpdate::new("addresses");
    update
        .set("street", fields.street)
        .set("number", fields.number)
        .set("district", fields.district)
        .set("city", fields.city)
        .set("state", fields.state)
        .set("zip_code", fields.zip_code)
        .set("complement", fields.complement)
        .set("reference", fields.reference);

    if update.is_empty() {
        return Err(AppError::BadRequest("no fields to update".into()));
    }

    let mut query = update.where_id("id", id);
    let result = query.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("address"));
    }
    Ok(())
}

pub async fn delete_address(pool: &DbPool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("address"));
    }
    Ok(())
}
