use axum::Router;

use crate::state::AppState;

pub mod cart;
pub mod doc;
pub mod favorites;
pub mod health;
pub mod orders;
pub mod owners;
pub mod provider_orders;
pub mod providers;
pub mod services;

// Paths are flat, so the feature routers are merged rather than nested.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(owners::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(favorites::router())
        .merge(providers::router())
        .merge(services::router())
        .merge(provider_orders::router())
}
