use crate::{
    dto::favorites::{AddFavoriteRequest, FavoriteList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Favorite,
    response::{ApiResponse, Meta},
    services::{cart_service::service_snapshot, owner_service::resolve_owner},
    state::AppState,
};

pub async fn list_favorites(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<FavoriteList>> {
    let owner = resolve_owner(state, user).await?;
    let items = sqlx::query_as::<_, Favorite>(
        "SELECT * FROM favorites WHERE owner_id = $1 ORDER BY favorites_id",
    )
    .bind(owner.owner_id)
    .fetch_all(&state.pool)
    .await?;

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", FavoriteList { items }, Some(meta)))
}

pub async fn add_favorite(
    state: &AppState,
    user: &AuthUser,
    payload: AddFavoriteRequest,
) -> AppResult<ApiResponse<Favorite>> {
    let owner = resolve_owner(state, user).await?;
    let service = match service_snapshot(state, payload.service_id).await? {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let favorite = sqlx::query_as::<_, Favorite>(
        r#"
        INSERT INTO favorites (owner_id, service_id, service_name, service_provider_name)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(owner.owner_id)
    .bind(service.service_id)
    .bind(&service.service_name)
    .bind(&service.provider_name)
    .fetch_one(&state.pool)
    .await?;

    tracing::debug!(
        owner_id = owner.owner_id,
        favorites_id = favorite.favorites_id,
        "favorite added"
    );

    Ok(ApiResponse::success(
        "Added to favorites",
        favorite,
        Some(Meta::empty()),
    ))
}

pub async fn remove_favorite(
    state: &AppState,
    user: &AuthUser,
    favorites_id: i32,
) -> AppResult<()> {
    let owner = resolve_owner(state, user).await?;
    let result = sqlx::query("DELETE FROM favorites WHERE favorites_id = $1 AND owner_id = $2")
        .bind(favorites_id)
        .bind(owner.owner_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}
