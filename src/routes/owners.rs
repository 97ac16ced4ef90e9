use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, OwnerRegisterRequest},
        profiles::UpdateOwnerProfileRequest,
    },
    error::AppResult,
    extract::AppJson,
    middleware::auth::{AuthUser, Role},
    models::Owner,
    response::ApiResponse,
    services::{auth_service, owner_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/owner_register/", post(register))
        .route("/owner_login/", post(login))
        .route("/owner_profile-view/", get(profile))
        .route("/owner_profile/update/", put(update_profile))
}

#[utoipa::path(
    post,
    path = "/owner_register/",
    request_body = OwnerRegisterRequest,
    responses(
        (status = 201, description = "Register a pet owner", body = ApiResponse<Owner>),
        (status = 400, description = "Validation failed or email/username taken")
    ),
    tag = "Owners"
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<OwnerRegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Owner>>)> {
    let resp = auth_service::register_owner(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/owner_login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Issue a bearer token", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid credentials")
    ),
    tag = "Owners"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login(&state, Role::Owner, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/owner_profile-view/",
    responses(
        (status = 200, description = "Profile of the calling owner", body = ApiResponse<Owner>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an owner")
    ),
    security(("bearer_auth" = [])),
    tag = "Owners"
)]
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Owner>>> {
    let resp = owner_service::get_profile(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/owner_profile/update/",
    request_body = UpdateOwnerProfileRequest,
    responses(
        (status = 200, description = "Partially update the calling owner", body = ApiResponse<Owner>),
        (status = 400, description = "Validation failed or email taken"),
        (status = 403, description = "Caller is not an owner")
    ),
    security(("bearer_auth" = [])),
    tag = "Owners"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<UpdateOwnerProfileRequest>,
) -> AppResult<Json<ApiResponse<Owner>>> {
    let resp = owner_service::update_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}
