use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post, put},
};

use crate::{
    dto::services::{
        AddReviewRequest, CreateServiceRequest, MarkDealRequest, MarkSpecialRequest, ReviewList,
        ServiceList, UpdateServiceRequest,
    },
    error::AppResult,
    extract::{AppJson, AppPath},
    middleware::auth::AuthUser,
    models::Service,
    response::ApiResponse,
    services::{catalog_service, review_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create_service", post(create_service))
        .route("/services/all", get(list_services))
        .route("/services/one", get(list_services_for_provider))
        .route("/services/deal_of_the_day/", get(list_deal_of_the_day))
        .route("/services/todays_special/", get(list_todays_special))
        .route("/services/{service_id}", get(get_service))
        .route("/services/{service_id}/update", put(update_service))
        .route("/services/{service_id}/delete", delete(delete_service))
        .route("/services/{service_id}/mark_special/", patch(mark_special))
        .route("/services/{service_id}/mark_deal/", patch(mark_deal))
        .route("/add_review/{service_id}/", post(add_review))
}

#[utoipa::path(
    post,
    path = "/create_service",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Create a service for the calling provider", body = ApiResponse<Service>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Caller is not a provider"),
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
pub async fn create_service(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Service>>)> {
    let resp = catalog_service::create_service(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/services/all",
    responses(
        (status = 200, description = "Browse the whole catalog", body = ApiResponse<ServiceList>)
    ),
    tag = "Services"
)]
pub async fn list_services(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ServiceList>>> {
    let resp = catalog_service::list_services(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/services/one",
    responses(
        (status = 200, description = "Services of the calling provider", body = ApiResponse<ServiceList>),
        (status = 403, description = "Caller is not a provider"),
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
pub async fn list_services_for_provider(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ServiceList>>> {
    let resp = catalog_service::list_services_for_provider(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/services/{service_id}",
    params(
        ("service_id" = i32, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "One service", body = ApiResponse<Service>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Services"
)]
pub async fn get_service(
    State(state): State<AppState>,
    AppPath(service_id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<Service>>> {
    let resp = catalog_service::get_service(&state, service_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/services/{service_id}/update",
    params(
        ("service_id" = i32, Path, description = "Service ID")
    ),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Partially update an owned service", body = ApiResponse<Service>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Service belongs to another provider"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
pub async fn update_service(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(service_id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateServiceRequest>,
) -> AppResult<Json<ApiResponse<Service>>> {
    let resp = catalog_service::update_service(&state, &user, service_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/services/{service_id}/delete",
    params(
        ("service_id" = i32, Path, description = "Service ID")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Service belongs to another provider"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
pub async fn delete_service(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(service_id): AppPath<i32>,
) -> AppResult<StatusCode> {
    catalog_service::delete_service(&state, &user, service_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/services/{service_id}/mark_special/",
    params(
        ("service_id" = i32, Path, description = "Service ID")
    ),
    request_body(content = MarkSpecialRequest, description = "Optional; an empty body sets the flag to true"),
    responses(
        (status = 200, description = "Set or clear today's special", body = ApiResponse<Service>),
        (status = 403, description = "Service belongs to another provider"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
pub async fn mark_special(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(service_id): AppPath<i32>,
    payload: Option<AppJson<MarkSpecialRequest>>,
) -> AppResult<Json<ApiResponse<Service>>> {
    let payload = payload.map(|AppJson(body)| body).unwrap_or_default();
    let resp = catalog_service::mark_special(&state, &user, service_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/services/{service_id}/mark_deal/",
    params(
        ("service_id" = i32, Path, description = "Service ID")
    ),
    request_body(content = MarkDealRequest, description = "Optional; an empty body sets the flag to true"),
    responses(
        (status = 200, description = "Set or clear deal of the day", body = ApiResponse<Service>),
        (status = 403, description = "Service belongs to another provider"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
pub async fn mark_deal(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(service_id): AppPath<i32>,
    payload: Option<AppJson<MarkDealRequest>>,
) -> AppResult<Json<ApiResponse<Service>>> {
    let payload = payload.map(|AppJson(body)| body).unwrap_or_default();
    let resp = catalog_service::mark_deal(&state, &user, service_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/services/deal_of_the_day/",
    responses(
        (status = 200, description = "Services flagged as deal of the day", body = ApiResponse<ServiceList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
pub async fn list_deal_of_the_day(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<ServiceList>>> {
    let resp = catalog_service::list_deal_of_the_day(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/services/todays_special/",
    responses(
        (status = 200, description = "Services flagged as today's special", body = ApiResponse<ServiceList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Deals"
)]
pub async fn list_todays_special(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<ServiceList>>> {
    let resp = catalog_service::list_todays_special(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/add_review/{service_id}/",
    params(
        ("service_id" = i32, Path, description = "Service ID")
    ),
    request_body = AddReviewRequest,
    responses(
        (status = 200, description = "Append a review; returns all reviews in order", body = ApiResponse<ReviewList>),
        (status = 400, description = "Review is required"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn add_review(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(service_id): AppPath<i32>,
    AppJson(payload): AppJson<AddReviewRequest>,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let resp = review_service::add_review(&state, &user, service_id, payload).await?;
    Ok(Json(resp))
}
