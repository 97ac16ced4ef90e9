use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Service;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateServiceRequest {
    pub service_name: String,
    pub description: String,
    #[schema(value_type = String, example = "25.00")]
    pub price: Decimal,
    #[serde(default)]
    pub is_deal_of_the_day: bool,
    #[serde(default)]
    pub is_todays_special: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateServiceRequest {
    pub service_name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "25.00")]
    pub price: Option<Decimal>,
    /// Kept unchanged when omitted.
    pub provider: Option<i32>,
    pub is_deal_of_the_day: Option<bool>,
    pub is_todays_special: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MarkSpecialRequest {
    pub is_todays_special: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MarkDealRequest {
    pub is_deal_of_the_day: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddReviewRequest {
    pub review: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewList {
    pub service_id: i32,
    pub reviews: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ServiceList {
    #[schema(value_type = Vec<Service>)]
    pub items: Vec<Service>,
}
