use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::orders::{OrderList, OrderSearchQuery},
    error::AppResult,
    extract::{AppPath, AppQuery},
    middleware::auth::AuthUser,
    models::Order,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/place_order/", post(place_order))
        .route("/view_order_status/{order_id}/", get(get_order))
        .route("/cancel_order/{order_id}/", post(cancel_order))
        .route("/search_orders/", get(search_orders))
        .route("/view_all_orders/", get(list_orders))
}

#[utoipa::path(
    post,
    path = "/place_order/",
    responses(
        (status = 201, description = "Convert the whole cart into orders", body = ApiResponse<OrderList>),
        (status = 400, description = "Cart is empty"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderList>>)> {
    let resp = order_service::place_order(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/view_order_status/{order_id}/",
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "One of the caller's orders", body = ApiResponse<Order>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(order_id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::get_order(&state, &user, order_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/cancel_order/{order_id}/",
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<Order>),
        (status = 400, description = "Order cannot be cancelled"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(order_id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::cancel_order(&state, &user, order_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/search_orders/",
    params(OrderSearchQuery),
    responses(
        (status = 200, description = "Orders whose service name matches", body = ApiResponse<OrderList>),
        (status = 404, description = "No orders found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn search_orders(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<OrderSearchQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::search_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/view_all_orders/",
    responses(
        (status = 200, description = "Every order of the caller", body = ApiResponse<OrderList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, &user).await?;
    Ok(Json(resp))
}
