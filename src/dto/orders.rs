use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{Order, ProviderOrder};

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProviderOrderList {
    #[schema(value_type = Vec<ProviderOrder>)]
    pub items: Vec<ProviderOrder>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    /// One of `Placed`, `Processed`, `Completed`, `Cancelled`.
    pub status: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderSearchQuery {
    /// Case-insensitive fragment of the service name.
    pub service_name: Option<String>,
}
