use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Favorite;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddFavoriteRequest {
    pub service_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FavoriteList {
    #[schema(value_type = Vec<Favorite>)]
    pub items: Vec<Favorite>,
}
