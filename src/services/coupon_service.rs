use chrono::{NaiveDate, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    db::PartialUpdate,
    dto::{coupons::CouponForm, ensure_money, require, require_text},
    entity::coupons::{ActiveModel, Column, Entity as Coupons, Model as CouponModel},
    error::{AppError, AppResult},
    models::Coupon,
    state::AppState,
};

pub const DEFAULT_DISCOUNT_TYPE: &str = "percentual";

pub async fn list_coupons(state: &AppState) -> AppResult<Vec<Coupon>> {
    let coupons = Coupons::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(coupon_from_entity)
        .collect();

    Ok(coupons)
}

pub async fn create_coupon(state: &AppState, form: CouponForm) -> AppResult<Coupon> {
    let discount = require(form.discount, "desconto")?;
    ensure_money(discount, "desconto")?;
    let active = ActiveModel {
        id: NotSet,
        code: Set(require_text(form.code, "codigo")?.trim().to_string()),
        description: Set(form.description.unwrap_or_default()),
        discount: Set(discount),
        discount_type: Set(form
            .discount_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DISCOUNT_TYPE.to_string())),
        valid_until: Set(require(form.valid_until, "data_validade")?),
        active: Set(form.active.unwrap_or(true)),
        admin_id: Set(Some(require(form.admin_id, "Administrador_idAdministrador")?)),
        created_at: NotSet,
    };
    let coupon = active.insert(&state.orm).await?;

    tracing::info!(coupon_id = coupon.id, code = %coupon.code, "coupon created");
    Ok(coupon_from_entity(coupon))
}

pub async fn update_coupon(state: &AppState, id: i64, form: CouponForm) -> AppResult<()> {
    if let Some(discount) = form.discount {
        ensure_money(discount, "desconto")?;
    }
    let mut update = PartialUpdate::new("coupons");
    update
        .set("code", form.code)
        .set("description", form.description)
        .set("discount", form.discount)
        .set("discount_type", form.discount_type)
        .set("valid_until", form.valid_until)
        .set("active", form.active);

    if update.is_empty() {
        return Err(AppError::BadRequest("no fields to update".into()));
    }

    let mut query = update.where_id("id", id);
    let result = query.build().execute(&state.pool).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("coupon"));
    }
    Ok(())
}

pub async fn delete_coupon(state: &AppState, id: i64) -> AppResult<()> {
    let result = Coupons::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("coupon"));
    }
    Ok(())
}

/// Looks a code up and checks that it can still be used today.
pub async fn validate_coupon(state: &AppState, code: Option<String>) -> AppResult<Coupon> {
    let code = require_text(code, "codigo")?;

    let coupon = Coupons::find()
        .filter(Column::Code.eq(code.trim()))
        .one(&state.orm)
        .await?;

    match coupon {
        Some(coupon) if coupon_is_valid(&coupon, Utc::now().date_naive()) => {
            Ok(coupon_from_entity(coupon))
        }
        _ => Err(AppError::BadRequest("invalid or expired coupon".into())),
    }
}

/// A coupon is usable while active and up to its expiry date inclusive.
pub fn coupon_is_valid(coupon: &CouponModel, today: NaiveDate) -> bool {
    coupon.active && coupon.valid_until >= today
}

fn coupon_from_entity(model: CouponModel) -> Coupon {
    Coupon {
        id: model.id,
        code: model.code,
        description: model.description,
        discount: model.discount,
        discount_type: model.discount_type,
        valid_until: model.valid_until,
        active: model.active,
        admin_id: model.admin_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use rust_decimal::Decimal;

    use super::*;

    fn coupon(active: bool, valid_until: NaiveDate) -> CouponModel {
        let created_at = NaiveDate::from_ymd_opt(2026, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
            .and_local_timezone(FixedOffset::east_opt(0).unwrap())
            .unwrap();
        CouponModel {
            id: 1,
            code: "BEMVINDO10".into(),
            description: String::new(),
            discount: Decimal::new(10, 0),
            discount_type: DEFAULT_DISCOUNT_TYPE.into(),
            valid_until,
            active,
            admin_id: Some(1),
            created_at,
        }
    }

    #[test]
    fn coupon_is_valid_through_its_last_day() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert!(coupon_is_valid(&coupon(true, today), today));
        assert!(coupon_is_valid(
            &coupon(true, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()),
            today
        ));
        assert!(!coupon_is_valid(
            &coupon(true, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()),
            today
        ));
    }

    #[test]
    fn inactive_coupons_are_never_valid() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert!(!coupon_is_valid(&coupon(false, today), today));
    }
}
