use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub use crate::entity::orders::OrderStatus;

/// Public view of a pet owner; credentials are never exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Owner {
    pub owner_id: i32,
    pub username: String,
    pub owner_name: String,
    pub pet_name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub pet_age: i32,
    pub animal_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Provider {
    pub provider_id: i32,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Service {
    pub service_id: i32,
    pub service_name: String,
    pub description: String,
    #[schema(value_type = String, example = "25.00")]
    pub price: Decimal,
    pub provider: i32,
    pub provider_name: String,
    pub is_deal_of_the_day: bool,
    pub is_todays_special: bool,
    /// Review texts in the order they were added.
    pub reviews: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct CartItem {
    pub cart_id: i32,
    #[serde(rename = "owner")]
    pub owner_id: i32,
    pub service_id: i32,
    pub service_name: String,
    pub scheduled_date_time: DateTime<Utc>,
    pub service_provider_name: String,
    #[schema(value_type = String, example = "25.00")]
    pub service_charges: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub order_id: i32,
    #[serde(rename = "owner")]
    pub owner_id: i32,
    pub service_id: i32,
    pub service_name: String,
    pub scheduled_date_time: DateTime<Utc>,
    pub service_provider_name: String,
    #[schema(value_type = String, example = "25.00")]
    pub service_charges: Decimal,
    pub status: OrderStatus,
}

/// An order as seen by the provider of its service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProviderOrder {
    pub order_id: i32,
    pub owner_name: String,
    pub service_id: i32,
    pub service_name: String,
    pub scheduled_date_time: DateTime<Utc>,
    pub service_provider_name: String,
    #[schema(value_type = String, example = "25.00")]
    pub service_charges: Decimal,
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct Favorite {
    pub favorites_id: i32,
    #[serde(rename = "owner")]
    pub owner_id: i32,
    pub service_id: i32,
    pub service_name: String,
    pub service_provider_name: String,
}
