use std::collections::BTreeMap;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::NaiveDate;
use password_hash::rand_core::OsRng;

use crate::{
    audit,
    db::DbPool,
    dto::{
        accounts::{
            ChangePasswordRequest, LoggedAdmin, LoggedUser, LoginRequest, ResetPasswordRequest,
            ResetUser, UpdateProfileRequest, UserForm,
        },
        require, require_text,
    },
    error::{AppError, AppResult},
    models::User,
};

pub const MIN_PASSWORD_LEN: usize = 6;

const USER_COLUMNS: &str =
    "id, social_name, full_name, email, cpf, phone, birth_date, active, created_at, last_access_at";

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(password_hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// CPF numbers are compared by their digits alone.
pub fn normalize_cpf(cpf: &str) -> String {
    cpf.chars().filter(char::is_ascii_digit).collect()
}

fn ensure_password_strength(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

struct ValidUserForm {
    full_name: String,
    phone: String,
    email: String,
    password: String,
    birth_date: NaiveDate,
    cpf: String,
}

fn validate_user_form(form: UserForm) -> AppResult<ValidUserForm> {
    let valid = ValidUserForm {
        full_name: require_text(form.full_name, "nome")?,
        phone: require_text(form.phone, "telefone")?,
        email: require_text(form.email, "email")?.trim().to_lowercase(),
        password: require_text(form.password, "senha")?,
        birth_date: require(form.birth_date, "data_nascimento")?,
        cpf: normalize_cpf(&require_text(form.cpf, "cpf")?),
    };
    ensure_password_strength(&valid.password)?;
    Ok(valid)
}

/// Creates an account; `created_by` is set when an administrator adds it.
pub async fn register_user(pool: &DbPool, form: UserForm, created_by: Option<i64>) -> AppResult<i64> {
    let form = validate_user_form(form)?;
    let password_hash = hash_password(&form.password)?;

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO users (full_name, email, password_hash, cpf, phone, birth_date, created_by_admin_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(form.full_name)
    .bind(form.email)
    .bind(password_hash)
    .bind(form.cpf)
    .bind(form.phone)
    .bind(form.birth_date)
    .bind(created_by)
    .fetch_one(pool)
    .await?;

    audit::record(
        pool,
        Some(id),
        "user_register",
        "users",
        serde_json::json!({ "user_id": id, "created_by": created_by }),
    )
    .await;

    Ok(id)
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    full_name: String,
    email: String,
    phone: String,
    birth_date: NaiveDate,
    password_hash: String,
    active: bool,
}

pub async fn login_user(pool: &DbPool, payload: LoginRequest) -> AppResult<LoggedUser> {
    let email = require_text(payload.email, "email")?.trim().to_lowercase();
    let password = require_text(payload.password, "senha")?;

    let user = sqlx::query_as::<_, CredentialRow>(
        r#"
        SELECT id, full_name, email, phone, birth_date, password_hash, active
        FROM users WHERE email = $1
        "#,
    )
    .bind(&email)
    .fetch_optional(pool)
    .await?;

    let user = match user {
        Some(u) if verify_password(&password, &u.password_hash)? => u,
        _ => return Err(AppError::Unauthorized("Invalid email or password".into())),
    };
    if !user.active {
        return Err(AppError::Forbidden("account is locked".into()));
    }

    sqlx::query("UPDATE users SET last_access_at = NOW() WHERE id = $1")
        .bind(user.id)
        .execute(pool)
        .await?;

    Ok(LoggedUser {
        id: user.id,
        full_name: user.full_name,
        email: user.email,
        phone: user.phone,
        birth_date: user.birth_date,
    })
}

pub async fn login_admin(pool: &DbPool, payload: LoginRequest) -> AppResult<LoggedAdmin> {
    let email = require_text(payload.email, "email")?.trim().to_lowercase();
    let password = require_text(payload.password, "senha")?;

    let admin: Option<(i64, String, String, String)> = sqlx::query_as(
        "SELECT id, name, email, password_hash FROM admins WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(pool)
    .await?;

    match admin {
        Some((id, name, email, hash)) if verify_password(&password, &hash)? => {
            Ok(LoggedAdmin { id, name, email })
        }
        _ => Err(AppError::Unauthorized("Invalid email or password".into())),
    }
}

pub async fn get_user(pool: &DbPool, id: i64) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    user.ok_or(AppError::NotFound("user"))
}

pub async fn update_profile(pool: &DbPool, id: i64, payload: UpdateProfileRequest) -> AppResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET social_name = $1, full_name = $2, phone = $3, birth_date = $4
        WHERE id = $5
        "#,
    )
    .bind(payload.social_name)
    .bind(payload.full_name)
    .bind(payload.phone)
    .bind(payload.birth_date)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("user"));
    }
    Ok(())
}

pub async fn change_password(pool: &DbPool, id: i64, payload: ChangePasswordRequest) -> AppResult<()> {
    let (current, new) = match (payload.current_password, payload.new_password) {
        (Some(c), Some(n)) if !c.is_empty() && !n.is_empty() => (c, n),
        _ => {
            return Err(AppError::BadRequest(
                "current and new password are required".into(),
            ));
        }
    };
    ensure_password_strength(&new)?;

    let stored: Option<(String,)> =
        sqlx::query_as("SELECT password_hash FROM users WHERE id = $1 AND active")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    let Some((stored_hash,)) = stored else {
        return Err(AppError::NotFound("user"));
    };

    if !verify_password(&current, &stored_hash)? {
        return Err(AppError::Unauthorized("current password is incorrect".into()));
    }

    sqlx::query("UPDATE users SET password_hash = $1, last_access_at = NOW() WHERE id = $2")
        .bind(hash_password(&new)?)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

#[derive(sqlx::FromRow)]
struct ResetCandidate {
    id: i64,
    full_name: String,
    email: String,
    active: bool,
    cpf: String,
    birth_date: NaiveDate,
}

/// Resets a forgotten password after matching CPF and birth date.
///
/// Failed attempts are counted per email in `password_reset_attempts`; when
/// the count reaches `max_attempts` the account is deactivated.
pub async fn reset_password(
    pool: &DbPool,
    max_attempts: i32,
    payload: ResetPasswordRequest,
) -> AppResult<ResetUser> {
    let email = require_text(payload.email, "email")?.trim().to_lowercase();
    let cpf = normalize_cpf(&require_text(payload.cpf, "cpf")?);
    let birth_date = require(payload.birth_date, "data_nascimento")?;
    let new_password = require_text(payload.new_password, "nova_senha")?;
    ensure_password_strength(&new_password)?;

    let user = sqlx::query_as::<_, ResetCandidate>(
        "SELECT id, full_name, email, active, cpf, birth_date FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(pool)
    .await?;
    let Some(user) = user else {
        return Err(AppError::NotFound("user"));
    };

    if !user.active {
        return Err(AppError::Forbidden(
            "account locked after too many attempts, contact support".into(),
        ));
    }

    let mut tx = pool.begin().await?;

    if normalize_cpf(&user.cpf) == cpf && user.birth_date == birth_date {
        sqlx::query("UPDATE users SET password_hash = $1, last_access_at = NOW() WHERE id = $2")
            .bind(hash_password(&new_password)?)
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM password_reset_attempts WHERE email = $1")
            .bind(&email)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(user_id = user.id, "password reset");
        return Ok(ResetUser {
            full_name: user.full_name,
            email: user.email,
        });
    }

    let (attempts,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO password_reset_attempts (email, attempts)
        VALUES ($1, 1)
        ON CONFLICT (email)
        DO UPDATE SET attempts = password_reset_attempts.attempts + 1, updated_at = NOW()
        RETURNING attempts
        "#,
    )
    .bind(&email)
    .fetch_one(&mut *tx)
    .await?;

    let remaining = remaining_attempts(attempts, max_attempts);
    if remaining == 0 {
        sqlx::query("UPDATE users SET active = FALSE WHERE id = $1")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::warn!(user_id = user.id, attempts, "account locked after failed resets");
        return Err(AppError::Forbidden(
            "account locked after too many invalid attempts, contact support".into(),
        ));
    }
    tx.commit().await?;

    tracing::debug!(user_id = user.id, attempts, "password reset mismatch");
    Err(AppError::Unauthorized(format!(
        "invalid data, {remaining} attempt(s) remaining"
    )))
}

pub fn remaining_attempts(attempts: i32, max_attempts: i32) -> i32 {
    (max_attempts - attempts).max(0)
}

pub async fn list_reset_attempts(pool: &DbPool) -> AppResult<BTreeMap<String, i32>> {
    let rows: Vec<(String, i32)> =
        sqlx::query_as("SELECT email, attempts FROM password_reset_attempts")
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().collect())
}

/// Returns `true` when the email had attempts on record.
pub async fn clear_reset_attempts(pool: &DbPool, email: &str) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM password_reset_attempts WHERE email = $1")
        .bind(email.trim().to_lowercase())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_users(pool: &DbPool) -> AppResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
        .fetch_all(pool)
        .await?;
    Ok(users)
}

/// Admin edit: every field is required, the password is re-hashed.
pub async fn edit_user(pool: &DbPool, id: i64, form: UserForm) -> AppResult<()> {
    let form = validate_user_form(form)?;
    let password_hash = hash_password(&form.password)?;

    let result = sqlx::query(
        r#"
        UPDATE users
        SET full_name = $1, phone = $2, email = $3, password_hash = $4, birth_date = $5, cpf = $6
        WHERE id = $7
        "#,
    )
    .bind(form.full_name)
    .bind(form.phone)
    .bind(form.email)
    .bind(password_hash)
    .bind(form.birth_date)
    .bind(form.cpf)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("user"));
    }
    Ok(())
}

pub async fn delete_user(pool: &DbPool, id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("user"));
    }
    Ok(())
}

pub async fn find_client_by_cpf(pool: &DbPool, cpf: &str) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE cpf = $1"))
        .bind(normalize_cpf(cpf))
        .fetch_optional(pool)
        .await?;
    user.ok_or(AppError::NotFound("client"))
}

pub async fn delete_client_by_cpf(pool: &DbPool, cpf: &str) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM users WHERE cpf = $1")
        .bind(normalize_cpf(cpf))
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("client"));
    }
    Ok(())
}

pub async fn count_users(pool: &DbPool) -> AppResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_punctuation_is_ignored() {
        assert_eq!(normalize_cpf("123.456.789-00"), "12345678900");
        assert_eq!(normalize_cpf("12345678900"), "12345678900");
    }

    #[test]
    fn password_hash_round_trips() {
        let hash = hash_password("segredo123").unwrap();
        assert_ne!(hash, "segredo123");
        assert!(verify_password("segredo123", &hash).unwrap());
        assert!(!verify_password("errada", &hash).unwrap());
    }

    #[test]
    fn remaining_attempts_never_goes_negative() {
        assert_eq!(remaining_attempts(1, 5), 4);
        assert_eq!(remaining_attempts(5, 5), 0);
        assert_eq!(remaining_attempts(7, 5), 0);
    }

    #[test]
    fn short_passwords_are_rejected() {
        let form = UserForm {
            full_name: Some("Ana Souza".into()),
            phone: Some("11999999999".into()),
            email: Some("Ana@Example.com".into()),
            password: Some("123".into()),
            birth_date: NaiveDate::from_ymd_opt(2000, 1, 1),
            cpf: Some("123.456.789-00".into()),
        };
        assert!(matches!(
            validate_user_form(form),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn user_form_is_normalized() {
        let form = UserForm {
            full_name: Some("Ana Souza".into()),
            phone: Some("11999999999".into()),
            email: Some(" Ana@Example.com ".into()),
            password: Some("123456".into()),
            birth_date: NaiveDate::from_ymd_opt(2000, 1, 1),
            cpf: Some("123.456.789-00".into()),
        };
        let valid = validate_user_form(form).unwrap();
        assert_eq!(valid.email, "ana@example.com");
        assert_eq!(valid.cpf, "12345678900");
    }
}
