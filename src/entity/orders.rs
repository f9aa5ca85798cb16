use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub address: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_value: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub freight_value: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub discount_value: Decimal,
    pub coupon_code: Option<String>,
    pub status: String,
    pub payment_method: String,
    pub note: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub status_changed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
