use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};

use crate::{
    dto::orders::{ProviderOrderList, UpdateOrderStatusRequest},
    error::AppResult,
    extract::{AppJson, AppPath},
    middleware::auth::AuthUser,
    models::Order,
    response::ApiResponse,
    services::provider_order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/view_orders/", get(list_orders))
        .route("/update_order_status/{order_id}/", put(update_order_status))
}

#[utoipa::path(
    get,
    path = "/view_orders/",
    responses(
        (status = 200, description = "Orders placed for the caller's services", body = ApiResponse<ProviderOrderList>),
        (status = 403, description = "Caller is not a provider"),
    ),
    security(("bearer_auth" = [])),
    tag = "Provider Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ProviderOrderList>>> {
    let resp = provider_order_service::list_orders(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/update_order_status/{order_id}/",
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Set the status of an order", body = ApiResponse<Order>),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Order is not for one of the caller's services"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Provider Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(order_id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = provider_order_service::update_order_status(&state, &user, order_id, payload).await?;
    Ok(Json(resp))
}
