use sea_orm::{ActiveModelTrait, EntityTrait, NotSet, Set};

use crate::{
    audit,
    dto::services::{AddReviewRequest, ReviewList},
    entity::{service_reviews, services::Entity as Services},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::catalog_service::reviews_by_service,
    state::AppState,
};

/// Append one review. Each review is its own row, so concurrent appends
/// never overwrite each other.
pub async fn add_review(
    state: &AppState,
    user: &AuthUser,
    service_id: i32,
    payload: AddReviewRequest,
) -> AppResult<ApiResponse<ReviewList>> {
    if Services::find_by_id(service_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let review = payload.review.trim();
    if review.is_empty() {
        return Err(AppError::BadRequest("Review is required".into()));
    }

    let inserted = service_reviews::ActiveModel {
        id: NotSet,
        service_id: Set(service_id),
        author_account_id: Set(Some(user.account_id)),
        review: Set(review.to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user.account_id,
        "review_add",
        "service_reviews",
        serde_json::json!({ "service_id": service_id, "review_id": inserted.id }),
    )
    .await;

    let reviews = reviews_by_service(&state.orm, &[service_id])
        .await?
        .remove(&service_id)
        .unwrap_or_default();

    Ok(ApiResponse::success(
        "Review added successfully",
        ReviewList {
            service_id,
            reviews,
        },
        Some(Meta::empty()),
    ))
}
