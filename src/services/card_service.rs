use crate::{
    db::DbPool,
    dto::cards::AddCardRequest,
    error::{AppError, AppResult},
};

/// What survives of a card once the number and CVV have been checked.
#[derive(Debug, PartialEq, Eq)]
struct StoredCard {
    holder_name: String,
    last_four: String,
    expiry: String,
}

fn sanitize_card(payload: &AddCardRequest) -> AppResult<StoredCard> {
    let holder_name = payload.holder_name.trim();
    if holder_name.is_empty() {
        return Err(AppError::BadRequest("nome is required".into()));
    }

    let digits: String = payload
        .number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if !(12..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest("numero is not a valid card number".into()));
    }

    let cvv = payload.cvv.trim();
    if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest("cvv is invalid".into()));
    }

    let expiry = payload.expiry.trim();
    if expiry.is_empty() {
        return Err(AppError::BadRequest("validade is required".into()));
    }

    Ok(StoredCard {
        holder_name: holder_name.to_string(),
        last_four: digits[digits.len() - 4..].to_string(),
        expiry: expiry.to_string(),
    })
}

/// Stores the holder name, last four digits and expiry of a card.
pub async fn add_card(pool: &DbPool, payload: AddCardRequest) -> AppResult<i64> {
    let card = sanitize_card(&payload)?;

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO cards (user_id, holder_name, last_four, expiry)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(payload.user_id)
    .bind(card.holder_name)
    .bind(card.last_four)
    .bind(card.expiry)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
