use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::{
    audit,
    dto::services::{
        CreateServiceRequest, MarkDealRequest, MarkSpecialRequest, ServiceList,
        UpdateServiceRequest,
    },
    entity::{
        providers::{self, Entity as Providers},
        service_reviews::{Column as ReviewCol, Entity as ServiceReviews},
        services::{ActiveModel, Column, Entity as Services, Model as ServiceModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Service,
    response::{ApiResponse, Meta},
    services::provider_service::resolve_provider,
    state::AppState,
    validation,
};

pub async fn list_services(state: &AppState) -> AppResult<ApiResponse<ServiceList>> {
    let items = find_services(state, Condition::all()).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Services", ServiceList { items }, Some(meta)))
}

pub async fn list_services_for_provider(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ServiceList>> {
    let provider = resolve_provider(state, user).await?;
    let items = find_services(
        state,
        Condition::all().add(Column::ProviderId.eq(provider.provider_id)),
    )
    .await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Services", ServiceList { items }, Some(meta)))
}

pub async fn list_deal_of_the_day(state: &AppState) -> AppResult<ApiResponse<ServiceList>> {
    let items = find_services(state, Condition::all().add(Column::IsDealOfTheDay.eq(true))).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Deal of the day", ServiceList { items }, Some(meta)))
}

pub async fn list_todays_special(state: &AppState) -> AppResult<ApiResponse<ServiceList>> {
    let items = find_services(state, Condition::all().add(Column::IsTodaysSpecial.eq(true))).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Today's special", ServiceList { items }, Some(meta)))
}

pub async fn get_service(state: &AppState, service_id: i32) -> AppResult<ApiResponse<Service>> {
    let service = load_service(state, service_id).await?;
    Ok(ApiResponse::success("Service", service, Some(Meta::empty())))
}

pub async fn create_service(
    state: &AppState,
    user: &AuthUser,
    payload: CreateServiceRequest,
) -> AppResult<ApiResponse<Service>> {
    let provider = resolve_provider(state, user).await?;
    let active = ActiveModel {
        service_id: NotSet,
        provider_id: Set(provider.provider_id),
        service_name: Set(validation::required(
            "service_name",
            &payload.service_name,
            validation::MAX_NAME_LEN,
        )?),
        description: Set(validation::required("description", &payload.description, 10_000)?),
        price: Set(validation::price(payload.price)?),
        is_todays_special: Set(payload.is_todays_special),
        is_deal_of_the_day: Set(payload.is_deal_of_the_day),
        created_at: NotSet,
    };
    let service = active.insert(&state.orm).await?;

    tracing::info!(
        provider_id = provider.provider_id,
        service_id = service.service_id,
        "service created"
    );
    audit::record(
        &state.pool,
        user.account_id,
        "service_create",
        "services",
        serde_json::json!({ "service_id": service.service_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Service created",
        service_from_entity(service, provider.name, Vec::new()),
        Some(Meta::empty()),
    ))
}

/// Partial update by the owning provider. `provider` moves the service to
/// another existing provider; when omitted the current one is kept.
pub async fn update_service(
    state: &AppState,
    user: &AuthUser,
    service_id: i32,
    payload: UpdateServiceRequest,
) -> AppResult<ApiResponse<Service>> {
    let provider = resolve_provider(state, user).await?;
    let existing = owned_service(state, &provider, service_id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(target) = payload.provider.filter(|id| *id != provider.provider_id) {
        if Providers::find_by_id(target).one(&state.orm).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Provider {target} does not exist"
            )));
        }
        active.provider_id = Set(target);
    }
    if let Some(service_name) = payload.service_name {
        active.service_name = Set(validation::required(
            "service_name",
            &service_name,
            validation::MAX_NAME_LEN,
        )?);
    }
    if let Some(description) = payload.description {
        active.description = Set(validation::required("description", &description, 10_000)?);
    }
    if let Some(price) = payload.price {
        active.price = Set(validation::price(price)?);
    }
    if let Some(flag) = payload.is_deal_of_the_day {
        active.is_deal_of_the_day = Set(flag);
    }
    if let Some(flag) = payload.is_todays_special {
        active.is_todays_special = Set(flag);
    }

    if active.is_changed() {
        active.update(&state.orm).await?;
    }

    audit::record(
        &state.pool,
        user.account_id,
        "service_update",
        "services",
        serde_json::json!({ "service_id": service_id }),
    )
    .await;

    let service = load_service(state, service_id).await?;
    Ok(ApiResponse::success("Updated", service, Some(Meta::empty())))
}

/// Removes the service and its reviews; past orders keep their snapshot.
pub async fn delete_service(state: &AppState, user: &AuthUser, service_id: i32) -> AppResult<()> {
    let provider = resolve_provider(state, user).await?;
    owned_service(state, &provider, service_id).await?;

    let result = Services::delete_by_id(service_id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        user.account_id,
        "service_delete",
        "services",
        serde_json::json!({ "service_id": service_id }),
    )
    .await;

    Ok(())
}

pub async fn mark_special(
    state: &AppState,
    user: &AuthUser,
    service_id: i32,
    payload: MarkSpecialRequest,
) -> AppResult<ApiResponse<Service>> {
    let provider = resolve_provider(state, user).await?;
    let existing = owned_service(state, &provider, service_id).await?;
    let flag = payload.is_todays_special.unwrap_or(true);

    tracing::debug!(
        provider_id = provider.provider_id,
        service_id,
        is_todays_special = flag,
        "marking service as today's special"
    );

    let mut active: ActiveModel = existing.into();
    active.is_todays_special = Set(flag);
    active.update(&state.orm).await?;

    let service = load_service(state, service_id).await?;
    Ok(ApiResponse::success("Updated", service, Some(Meta::empty())))
}

pub async fn mark_deal(
    state: &AppState,
    user: &AuthUser,
    service_id: i32,
    payload: MarkDealRequest,
) -> AppResult<ApiResponse<Service>> {
    let provider = resolve_provider(state, user).await?;
    let existing = owned_service(state, &provider, service_id).await?;
    let flag = payload.is_deal_of_the_day.unwrap_or(true);

    tracing::debug!(
        provider_id = provider.provider_id,
        service_id,
        is_deal_of_the_day = flag,
        "marking service as deal of the day"
    );

    let mut active: ActiveModel = existing.into();
    active.is_deal_of_the_day = Set(flag);
    active.update(&state.orm).await?;

    let service = load_service(state, service_id).await?;
    Ok(ApiResponse::success("Updated", service, Some(Meta::empty())))
}

/// Fetch a service the caller must own: missing is 404, foreign is 403.
async fn owned_service(
    state: &AppState,
    provider: &providers::Model,
    service_id: i32,
) -> AppResult<ServiceModel> {
    let service = Services::find_by_id(service_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    if service.provider_id != provider.provider_id {
        tracing::debug!(
            provider_id = provider.provider_id,
            service_id,
            "service belongs to another provider"
        );
        return Err(AppError::Forbidden);
    }
    Ok(service)
}

pub(crate) async fn load_service(state: &AppState, service_id: i32) -> AppResult<Service> {
    find_services(state, Condition::all().add(Column::ServiceId.eq(service_id)))
        .await?
        .into_iter()
        .next()
        .ok_or(AppError::NotFound)
}

async fn find_services(state: &AppState, condition: Condition) -> AppResult<Vec<Service>> {
    let rows = Services::find()
        .filter(condition)
        .find_also_related(Providers)
        .order_by_asc(Column::ServiceId)
        .all(&state.orm)
        .await?;

    let ids: Vec<i32> = rows.iter().map(|(service, _)| service.service_id).collect();
    let mut reviews = reviews_by_service(&state.orm, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|(service, provider)| {
            let provider_name = provider.map(|p| p.name).unwrap_or_default();
            let service_reviews = reviews.remove(&service.service_id).unwrap_or_default();
            service_from_entity(service, provider_name, service_reviews)
        })
        .collect())
}

/// Review texts per service, oldest first.
pub(crate) async fn reviews_by_service<C: ConnectionTrait>(
    db: &C,
    service_ids: &[i32],
) -> AppResult<HashMap<i32, Vec<String>>> {
    let mut grouped: HashMap<i32, Vec<String>> = HashMap::new();
    if service_ids.is_empty() {
        return Ok(grouped);
    }
    let rows = ServiceReviews::find()
        .filter(ReviewCol::ServiceId.is_in(service_ids.to_vec()))
        .order_by_asc(ReviewCol::Id)
        .all(db)
        .await?;
    for row in rows {
        grouped.entry(row.service_id).or_default().push(row.review);
    }
    Ok(grouped)
}

fn service_from_entity(
    model: ServiceModel,
    provider_name: String,
    reviews: Vec<String>,
) -> Service {
    Service {
        service_id: model.service_id,
        service_name: model.service_name,
        description: model.description,
        price: model.price,
        provider: model.provider_id,
        provider_name,
        is_deal_of_the_day: model.is_deal_of_the_day,
        is_todays_special: model.is_todays_special,
        reviews,
    }
}
