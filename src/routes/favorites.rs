use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};

use crate::{
    dto::favorites::{AddFavoriteRequest, FavoriteList},
    error::AppResult,
    extract::{AppJson, AppPath},
    middleware::auth::AuthUser,
    models::Favorite,
    response::ApiResponse,
    services::favorite_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites/", get(list_favorites))
        .route("/favorites/add/", post(add_favorite))
        .route("/favorites/delete/{favorites_id}/", delete(remove_favorite))
}

#[utoipa::path(
    post,
    path = "/favorites/add/",
    request_body = AddFavoriteRequest,
    responses(
        (status = 201, description = "Bookmark a service", body = ApiResponse<Favorite>),
        (status = 404, description = "Service not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<AddFavoriteRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Favorite>>)> {
    let resp = favorite_service::add_favorite(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/favorites/",
    responses(
        (status = 200, description = "Favorites of the calling owner", body = ApiResponse<FavoriteList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<FavoriteList>>> {
    let resp = favorite_service::list_favorites(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/favorites/delete/{favorites_id}/",
    params(
        ("favorites_id" = i32, Path, description = "Favorite ID")
    ),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Favorite not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(favorites_id): AppPath<i32>,
) -> AppResult<StatusCode> {
    favorite_service::remove_favorite(&state, &user, favorites_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
