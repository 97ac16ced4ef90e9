pub mod auth_service;
pub mod cart_service;
pub mod catalog_service;
pub mod favorite_service;
pub mod order_service;
pub mod owner_service;
pub mod provider_order_service;
pub mod provider_service;
pub mod review_service;
