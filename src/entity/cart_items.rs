use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub cart_id: i32,
    pub owner_id: i32,
    pub service_id: i32,
    pub service_name: String,
    pub service_provider_name: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub service_charges: Decimal,
    pub scheduled_date_time: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::owners::Entity",
        from = "Column::OwnerId",
        to = "super::owners::Column::OwnerId",
        on_delete = "Cascade"
    )]
    Owners,
}

impl Related<super::owners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owners.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
