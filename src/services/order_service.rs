use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
    sea_query::{Expr, LockType, extension::postgres::PgExpr},
};

use crate::{
    audit,
    dto::orders::{OrderList, OrderSearchQuery},
    entity::{
        cart_items::{Column as CartCol, Entity as CartItems},
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderStatus},
    response::{ApiResponse, Meta},
    services::owner_service::resolve_owner,
    state::AppState,
};

/// Convert the caller's whole cart into orders. Either every line becomes an
/// order and leaves the cart, or nothing changes.
pub async fn place_order(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<OrderList>> {
    let owner = resolve_owner(state, user).await?;
    let txn = state.orm.begin().await?;

    let lines = CartItems::find()
        .filter(CartCol::OwnerId.eq(owner.owner_id))
        .order_by_asc(CartCol::CartId)
        .lock(LockType::Update)
        .all(&txn)
        .await?;

    if lines.is_empty() {
        return Err(AppError::BadRequest("No items in cart".into()));
    }

    let mut orders = Vec::with_capacity(lines.len());
    for line in &lines {
        if line.service_charges < Decimal::ZERO {
            return Err(AppError::BadRequest(format!(
                "Cart item {} has invalid service charges",
                line.cart_id
            )));
        }

        let order = OrderActive {
            order_id: NotSet,
            owner_id: Set(owner.owner_id),
            service_id: Set(line.service_id),
            service_name: Set(line.service_name.clone()),
            service_provider_name: Set(line.service_provider_name.clone()),
            service_charges: Set(line.service_charges),
            scheduled_date_time: Set(line.scheduled_date_time),
            status: Set(OrderStatus::Placed),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&txn)
        .await?;
        orders.push(order_from_entity(order));
    }

    let cart_ids: Vec<i32> = lines.iter().map(|line| line.cart_id).collect();
    CartItems::delete_many()
        .filter(CartCol::CartId.is_in(cart_ids))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(owner_id = owner.owner_id, orders = orders.len(), "order placed");
    audit::record(
        &state.pool,
        user.account_id,
        "place_order",
        "orders",
        serde_json::json!({ "order_ids": orders.iter().map(|o| o.order_id).collect::<Vec<_>>() }),
    )
    .await;

    let meta = Meta::total(orders.len());
    Ok(ApiResponse::success(
        "Order placed successfully",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    order_id: i32,
) -> AppResult<ApiResponse<Order>> {
    let owner = resolve_owner(state, user).await?;
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::OwnerId.eq(owner.owner_id))
                .add(OrderCol::OrderId.eq(order_id)),
        )
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success(
        "OK",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

/// Owners may cancel only while the order is still `Placed`.
pub async fn cancel_order(
    state: &AppState,
    user: &AuthUser,
    order_id: i32,
) -> AppResult<ApiResponse<Order>> {
    let owner = resolve_owner(state, user).await?;
    let txn = state.orm.begin().await?;

    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::OwnerId.eq(owner.owner_id))
                .add(OrderCol::OrderId.eq(order_id)),
        )
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    if !order.status.is_cancellable() {
        return Err(AppError::BadRequest("Order cannot be cancelled".into()));
    }

    let mut active: OrderActive = order.into();
    active.status = Set(OrderStatus::Cancelled);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        user.account_id,
        "cancel_order",
        "orders",
        serde_json::json!({ "order_id": order.order_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order cancelled successfully",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

/// Case-insensitive substring search on the service name. No match is a 404.
pub async fn search_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderSearchQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let owner = resolve_owner(state, user).await?;
    let needle = query.service_name.unwrap_or_default().trim().to_lowercase();
    let pattern = format!("%{}%", escape_like(&needle));

    let orders: Vec<Order> = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::OwnerId.eq(owner.owner_id))
                .add(Expr::col(OrderCol::ServiceName).ilike(pattern)),
        )
        .order_by_asc(OrderCol::OrderId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    if orders.is_empty() {
        return Err(AppError::NotFound);
    }

    let meta = Meta::total(orders.len());
    Ok(ApiResponse::success("OK", OrderList { items: orders }, Some(meta)))
}

pub async fn list_orders(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<OrderList>> {
    let owner = resolve_owner(state, user).await?;
    let orders: Vec<Order> = Orders::find()
        .filter(OrderCol::OwnerId.eq(owner.owner_id))
        .order_by_asc(OrderCol::OrderId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::total(orders.len());
    Ok(ApiResponse::success("Ok", OrderList { items: orders }, Some(meta)))
}

pub fn order_from_entity(model: OrderModel) -> Order {
    Order {
        order_id: model.order_id,
        owner_id: model.owner_id,
        service_id: model.service_id,
        service_name: model.service_name,
        scheduled_date_time: model.scheduled_date_time.with_timezone(&Utc),
        service_provider_name: model.service_provider_name,
        service_charges: model.service_charges,
        status: model.status,
    }
}

/// `%` and `_` in user input match literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
