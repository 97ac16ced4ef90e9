use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
};

use crate::{
    dto::cart::{AddToCartRequest, CartList, UpdateScheduledTimeRequest},
    error::AppResult,
    extract::{AppJson, AppPath},
    middleware::auth::AuthUser,
    models::CartItem,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add_service_to_cart/", post(add_to_cart))
        .route("/cart_items/", get(cart_list))
        .route("/delete_service_from_cart/{cart_id}/", delete(remove_from_cart))
        .route("/update_scheduled_time/{cart_id}/", put(update_scheduled_time))
}

#[utoipa::path(
    get,
    path = "/cart_items/",
    responses(
        (status = 200, description = "Cart items of the calling owner", body = ApiResponse<CartList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartList>>> {
    let resp = cart_service::list_cart(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/add_service_to_cart/",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Snapshot a service into the cart", body = ApiResponse<CartItem>),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Service not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<AddToCartRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CartItem>>)> {
    let resp = cart_service::add_to_cart(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/delete_service_from_cart/{cart_id}/",
    params(
        ("cart_id" = i32, Path, description = "Cart item ID")
    ),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Cart item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(cart_id): AppPath<i32>,
) -> AppResult<StatusCode> {
    cart_service::remove_from_cart(&state, &user, cart_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/update_scheduled_time/{cart_id}/",
    params(
        ("cart_id" = i32, Path, description = "Cart item ID")
    ),
    request_body = UpdateScheduledTimeRequest,
    responses(
        (status = 200, description = "Reschedule a cart item", body = ApiResponse<CartItem>),
        (status = 404, description = "Cart item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn update_scheduled_time(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(cart_id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateScheduledTimeRequest>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let resp = cart_service::update_scheduled_time(&state, &user, cart_id, payload).await?;
    Ok(Json(resp))
}
