use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, ProviderRegisterRequest},
        profiles::UpdateProviderProfileRequest,
    },
    error::AppResult,
    extract::AppJson,
    middleware::auth::{AuthUser, Role},
    models::Provider,
    response::ApiResponse,
    services::{auth_service, provider_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/provider_register/", post(register))
        .route("/provider_login/", post(login))
        .route("/provider_profile/", get(profile))
        .route("/provider_profile/update/", put(update_profile))
}

#[utoipa::path(
    post,
    path = "/provider_register/",
    request_body = ProviderRegisterRequest,
    responses(
        (status = 201, description = "Register a service provider", body = ApiResponse<Provider>),
        (status = 400, description = "Validation failed or email/username taken")
    ),
    tag = "Providers"
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProviderRegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Provider>>)> {
    let resp = auth_service::register_provider(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/provider_login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Issue a bearer token", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid credentials")
    ),
    tag = "Providers"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login(&state, Role::Provider, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/provider_profile/",
    responses(
        (status = 200, description = "Profile of the calling provider", body = ApiResponse<Provider>),
        (status = 403, description = "Caller is not a provider")
    ),
    security(("bearer_auth" = [])),
    tag = "Providers"
)]
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Provider>>> {
    let resp = provider_service::get_profile(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/provider_profile/update/",
    request_body = UpdateProviderProfileRequest,
    responses(
        (status = 200, description = "Partially update the calling provider", body = ApiResponse<Provider>),
        (status = 400, description = "Validation failed or email/username taken"),
        (status = 403, description = "Caller is not a provider")
    ),
    security(("bearer_auth" = [])),
    tag = "Providers"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<UpdateProviderProfileRequest>,
) -> AppResult<Json<ApiResponse<Provider>>> {
    let resp = provider_service::update_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}
