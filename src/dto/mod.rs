pub mod auth;
pub mod cart;
pub mod favorites;
pub mod orders;
pub mod profiles;
pub mod services;
