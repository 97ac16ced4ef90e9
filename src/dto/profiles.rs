use serde::Deserialize;
use utoipa::ToSchema;

/// Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateOwnerProfileRequest {
    pub owner_name: Option<String>,
    pub pet_name: Option<String>,
    pub pet_age: Option<i32>,
    pub animal_type: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProviderProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub password: Option<String>,
}
