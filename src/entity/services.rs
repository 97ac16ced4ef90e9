use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub service_id: i32,
    pub provider_id: i32,
    pub service_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub is_todays_special: bool,
    pub is_deal_of_the_day: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::providers::Entity",
        from = "Column::ProviderId",
        to = "super::providers::Column::ProviderId",
        on_delete = "Cascade"
    )]
    Providers,
    #[sea_orm(has_many = "super::service_reviews::Entity")]
    ServiceReviews,
}

impl Related<super::providers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Providers.def()
    }
}

impl Related<super::service_reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceReviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
