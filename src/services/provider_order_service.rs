use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::{
    audit,
    dto::orders::{ProviderOrderList, UpdateOrderStatusRequest},
    entity::{
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        owners::Entity as Owners,
        providers,
        services::{Column as ServiceCol, Entity as Services},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderStatus, ProviderOrder},
    response::{ApiResponse, Meta},
    services::{order_service::order_from_entity, provider_service::resolve_provider},
    state::AppState,
};

/// Orders have no provider column; they are matched through the ids of the
/// provider's current services.
async fn provider_service_ids(
    state: &AppState,
    provider: &providers::Model,
) -> AppResult<Vec<i32>> {
    let ids = Services::find()
        .select_only()
        .column(ServiceCol::ServiceId)
        .filter(ServiceCol::ProviderId.eq(provider.provider_id))
        .into_tuple::<i32>()
        .all(&state.orm)
        .await?;
    Ok(ids)
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ProviderOrderList>> {
    let provider = resolve_provider(state, user).await?;
    let service_ids = provider_service_ids(state, &provider).await?;

    let items: Vec<ProviderOrder> = if service_ids.is_empty() {
        Vec::new()
    } else {
        Orders::find()
            .filter(OrderCol::ServiceId.is_in(service_ids))
            .find_also_related(Owners)
            .order_by_asc(OrderCol::OrderId)
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|(order, owner)| ProviderOrder {
                order_id: order.order_id,
                owner_name: owner.map(|o| o.owner_name).unwrap_or_default(),
                service_id: order.service_id,
                service_name: order.service_name,
                scheduled_date_time: order.scheduled_date_time.with_timezone(&Utc),
                service_provider_name: order.service_provider_name,
                service_charges: order.service_charges,
                status: order.status,
            })
            .collect()
    };

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Orders", ProviderOrderList { items }, Some(meta)))
}

/// Any of the four statuses may be set; there is no transition check.
pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    order_id: i32,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let provider = resolve_provider(state, user).await?;

    let existing = Orders::find_by_id(order_id).one(&state.orm).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let service_ids = provider_service_ids(state, &provider).await?;
    if !service_ids.contains(&existing.service_id) {
        return Err(AppError::Forbidden);
    }

    let status: OrderStatus = payload
        .status
        .trim()
        .parse()
        .map_err(AppError::BadRequest)?;

    let mut active: OrderActive = existing.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    tracing::info!(
        provider_id = provider.provider_id,
        order_id = order.order_id,
        status = %order.status,
        "order status updated"
    );
    audit::record(
        &state.pool,
        user.account_id,
        "order_status_update",
        "orders",
        serde_json::json!({ "order_id": order.order_id, "status": order.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}
