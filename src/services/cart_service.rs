use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::{
    dto::cart::{AddToCartRequest, CartList, UpdateScheduledTimeRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::CartItem,
    response::{ApiResponse, Meta},
    services::owner_service::resolve_owner,
    state::AppState,
};

/// Name, price and provider of a service at the moment it is added.
#[derive(FromRow)]
pub(crate) struct ServiceSnapshot {
    pub service_id: i32,
    pub service_name: String,
    pub price: Decimal,
    pub provider_name: String,
}

pub(crate) async fn service_snapshot(
    state: &AppState,
    service_id: i32,
) -> AppResult<Option<ServiceSnapshot>> {
    let snapshot = sqlx::query_as::<_, ServiceSnapshot>(
        r#"
        SELECT s.service_id, s.service_name, s.price, p.name AS provider_name
        FROM services s
        JOIN providers p ON p.provider_id = s.provider_id
        WHERE s.service_id = $1
        "#,
    )
    .bind(service_id)
    .fetch_optional(&state.pool)
    .await?;
    Ok(snapshot)
}

pub async fn list_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartList>> {
    let owner = resolve_owner(state, user).await?;
    let items = sqlx::query_as::<_, CartItem>(
        "SELECT * FROM cart_items WHERE owner_id = $1 ORDER BY cart_id",
    )
    .bind(owner.owner_id)
    .fetch_all(&state.pool)
    .await?;

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", CartList { items }, Some(meta)))
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let owner = resolve_owner(state, user).await?;

    let service = match service_snapshot(state, payload.service_id).await? {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };
    let scheduled: DateTime<Utc> = payload.scheduled_date_time.unwrap_or_else(Utc::now);

    let cart_item = sqlx::query_as::<_, CartItem>(
        r#"
        INSERT INTO cart_items
            (owner_id, service_id, service_name, service_provider_name,
             service_charges, scheduled_date_time)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(owner.owner_id)
    .bind(service.service_id)
    .bind(&service.service_name)
    .bind(&service.provider_name)
    .bind(service.price)
    .bind(scheduled)
    .fetch_one(&state.pool)
    .await?;

    tracing::debug!(
        owner_id = owner.owner_id,
        cart_id = cart_item.cart_id,
        service_id = service.service_id,
        "service added to cart"
    );

    Ok(ApiResponse::success("Added to cart", cart_item, Some(Meta::empty())))
}

/// Rows of other owners are reported as missing.
pub async fn remove_from_cart(state: &AppState, user: &AuthUser, cart_id: i32) -> AppResult<()> {
    let owner = resolve_owner(state, user).await?;
    let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND owner_id = $2")
        .bind(cart_id)
        .bind(owner.owner_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    tracing::debug!(owner_id = owner.owner_id, cart_id, "cart item removed");
    Ok(())
}

pub async fn update_scheduled_time(
    state: &AppState,
    user: &AuthUser,
    cart_id: i32,
    payload: UpdateScheduledTimeRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let owner = resolve_owner(state, user).await?;
    let updated = sqlx::query_as::<_, CartItem>(
        r#"
        UPDATE cart_items
        SET scheduled_date_time = $3
        WHERE cart_id = $1 AND owner_id = $2
        RETURNING *
        "#,
    )
    .bind(cart_id)
    .bind(owner.owner_id)
    .bind(payload.scheduled_date_time)
    .fetch_optional(&state.pool)
    .await?;

    match updated {
        Some(item) => Ok(ApiResponse::success("Updated", item, Some(Meta::empty()))),
        None => Err(AppError::NotFound),
    }
}
