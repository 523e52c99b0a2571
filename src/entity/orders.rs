use sea_orm::entity::prelude::*;

/// One order row per converted cart line-item. Immutable after checkout.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub ordered_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::addresses::Entity",
        from = "Column::AddressId",
        to = "super::addresses::Column::Id"
    )]
    Addresses,
    #[sea_orm(
        belongs_to = "super::balance_bikes::Entity",
        from = "Column::ProductId",
        to = "super::balance_bikes::Column::Id"
    )]
    BalanceBikes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::addresses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Addresses.def()
    }
}

impl Related<super::balance_bikes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BalanceBikes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
