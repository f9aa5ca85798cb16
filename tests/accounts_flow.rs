mod common;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use storefront_api::{
    dto::{
        accounts::{ChangePasswordRequest, LoginRequest, ResetPasswordRequest, UserForm},
        coupons::CouponForm,
    },
    error::AppError,
    services::{account_service, coupon_service},
};

fn reset(email: &str, cpf: &str, birth_date: NaiveDate, password: &str) -> ResetPasswordRequest {
    ResetPasswordRequest {
        email: Some(email.to_string()),
        cpf: Some(cpf.to_string()),
        birth_date: Some(birth_date),
        new_password: Some(password.to_string()),
    }
}

fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: Some(email.to_string()),
        password: Some(password.to_string()),
    }
}

#[tokio::test]
async fn sign_up_then_login() -> anyhow::Result<()> {
    let Some(state) = common::test_state().await? else {
        return Ok(());
    };
    let email = format!("nova-{}@example.com", common::unique());
    let cpf = common::unique_cpf();

    let form = || UserForm {
        full_name: Some("Nova Cliente".into()),
        phone: Some("11911112222".into()),
        email: Some(email.clone()),
        password: Some("segredo1".into()),
        birth_date: Some(common::birth_date()),
        cpf: Some(cpf.clone()),
    };

    let id = account_service::register_user(&state.pool, form(), None).await?;
    let duplicate = account_service::register_user(&state.pool, form(), None)
        .await
        .unwrap_err();
    assert_eq!(duplicate.status(), axum::http::StatusCode::CONFLICT);

    let logged = account_service::login_user(&state.pool, login(&email, "segredo1")).await?;
    assert_eq!(logged.id, id);

    let wrong = account_service::login_user(&state.pool, login(&email, "errada"))
        .await
        .unwrap_err();
    assert!(matches!(wrong, AppError::Unauthorized(_)));

    let profile = account_service::get_user(&state.pool, id).await?;
    assert_eq!(profile.cpf, cpf);
    let body = serde_json::to_value(&profile)?;
    assert!(body.get("password_hash").is_none());

    Ok(())
}

#[tokio::test]
async fn password_change_requires_the_current_password() -> anyhow::Result<()> {
    let Some(state) = common::test_state().await? else {
        return Ok(());
    };
    let user = common::create_user(&state).await?;

    let wrong = account_service::change_password(
        &state.pool,
        user.id,
        ChangePasswordRequest {
            current_password: Some("nao-e-essa".into()),
            new_password: Some("outra123".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(wrong, AppError::Unauthorized(_)));

    let short = account_service::change_password(
        &state.pool,
        user.id,
        ChangePasswordRequest {
            current_password: Some(user.password.clone()),
            new_password: Some("123".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(short, AppError::BadRequest(_)));

    account_service::change_password(
        &state.pool,
        user.id,
        ChangePasswordRequest {
            current_password: Some(user.password.clone()),
            new_password: Some("outra123".into()),
        },
    )
    .await?;
    account_service::login_user(&state.pool, login(&user.email, "outra123")).await?;

    Ok(())
}

#[tokio::test]
async fn five_failed_resets_lock_the_account() -> anyhow::Result<()> {
    let Some(state) = common::test_state().await? else {
        return Ok(());
    };
    let user = common::create_user(&state).await?;
    let wrong_date = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();

    for _ in 0..4 {
        let err = account_service::reset_password(
            &state.pool,
            5,
            reset(&user.email, &user.cpf, wrong_date, "nova123"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    let attempts = account_service::list_reset_attempts(&state.pool).await?;
    assert_eq!(attempts.get(&user.email), Some(&4));

    let locked = account_service::reset_password(
        &state.pool,
        5,
        reset(&user.email, &user.cpf, wrong_date, "nova123"),
    )
    .await
    .unwrap_err();
    assert!(matches!(locked, AppError::Forbidden(_)));

    // Even correct data is refused once the account is locked.
    let still_locked = account_service::reset_password(
        &state.pool,
        5,
        reset(&user.email, &user.cpf, common::birth_date(), "nova123"),
    )
    .await
    .unwrap_err();
    assert!(matches!(still_locked, AppError::Forbidden(_)));

    let login_err = account_service::login_user(&state.pool, login(&user.email, &user.password))
        .await
        .unwrap_err();
    assert!(matches!(login_err, AppError::Forbidden(_)));

    account_service::clear_reset_attempts(&state.pool, &user.email).await?;

    Ok(())
}

#[tokio::test]
async fn successful_reset_clears_the_counter() -> anyhow::Result<()> {
    let Some(state) = common::test_state().await? else {
        return Ok(());
    };
    let user = common::create_user(&state).await?;

    let err = account_service::reset_password(
        &state.pool,
        5,
        reset(&user.email, "000.000.000-00", common::birth_date(), "nova123"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    // CPF punctuation does not matter.
    let formatted_cpf = format!(
        "{}.{}.{}-{}",
        &user.cpf[..3],
        &user.cpf[3..6],
        &user.cpf[6..9],
        &user.cpf[9..]
    );
    let reset_user = account_service::reset_password(
        &state.pool,
        5,
        reset(&user.email, &formatted_cpf, common::birth_date(), "nova123"),
    )
    .await?;
    assert_eq!(reset_user.email, user.email);

    let attempts = account_service::list_reset_attempts(&state.pool).await?;
    assert!(!attempts.contains_key(&user.email));
    account_service::login_user(&state.pool, login(&user.email, "nova123")).await?;

    Ok(())
}

#[tokio::test]
async fn expired_and_inactive_coupons_are_rejected() -> anyhow::Result<()> {
    let Some(state) = common::test_state().await? else {
        return Ok(());
    };
    let (admin_id,): (i64,) = sqlx::query_as(
        "INSERT INTO admins (name, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("Admin Teste")
    .bind(format!("admin-{}@example.com", common::unique()))
    .bind("x")
    .fetch_one(&state.pool)
    .await?;

    let today = Utc::now().date_naive();
    let coupon = |code: &str, valid_until: NaiveDate, active: bool| CouponForm {
        code: Some(code.to_string()),
        description: None,
        discount: Some(Decimal::new(10, 0)),
        discount_type: None,
        valid_until: Some(valid_until),
        active: Some(active),
        admin_id: Some(admin_id),
    };

    let tag = common::unique().to_uppercase();
    let valid_code = format!("VALE{tag}");
    let expired_code = format!("VENCIDO{tag}");
    let inactive_code = format!("PAUSADO{tag}");

    coupon_service::create_coupon(&state, coupon(&valid_code, today + Duration::days(30), true)).await?;
    coupon_service::create_coupon(&state, coupon(&expired_code, today - Duration::days(1), true)).await?;
    coupon_service::create_coupon(&state, coupon(&inactive_code, today + Duration::days(30), false)).await?;

    let ok = coupon_service::validate_coupon(&state, Some(valid_code.clone())).await?;
    assert_eq!(ok.code, valid_code);
    assert_eq!(ok.discount_type, "percentual");

    for code in [expired_code, inactive_code, format!("NADA{tag}")] {
        let err = coupon_service::validate_coupon(&state, Some(code)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    Ok(())
}
