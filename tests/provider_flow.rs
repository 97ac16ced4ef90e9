mod common;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use petcare_api::{
    app::create_app,
    dto::{
        cart::AddToCartRequest,
        orders::UpdateOrderStatusRequest,
        profiles::UpdateProviderProfileRequest,
        services::{AddReviewRequest, MarkDealRequest, MarkSpecialRequest, UpdateServiceRequest},
    },
    error::AppError,
    middleware::auth::Role,
    models::OrderStatus,
    services::{
        auth_service, cart_service, catalog_service, order_service, provider_order_service,
        provider_service, review_service,
    },
};
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

#[tokio::test]
async fn catalog_management_is_scoped_to_owner_provider() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let (provider, user, _) = common::register_provider(&state).await?;
    let (rival, rival_user, _) = common::register_provider(&state).await?;

    let service = common::create_service(&state, &user, "Bath", "25.5").await?;
    assert_eq!(service.price, dec!(25.50));
    assert_eq!(service.provider, provider.provider_id);
    assert_eq!(service.provider_name, provider.name);
    assert!(!service.is_deal_of_the_day);
    assert!(service.reviews.is_empty());

    let updated = catalog_service::update_service(
        &state,
        &user,
        service.service_id,
        UpdateServiceRequest {
            price: Some(dec!(30)),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("service");
    assert_eq!(updated.price, dec!(30.00));
    assert_eq!(updated.service_name, service.service_name);
    assert_eq!(updated.provider, provider.provider_id);

    let err = catalog_service::update_service(
        &state,
        &user,
        service.service_id,
        UpdateServiceRequest {
            provider: Some(i32::MAX),
            ..Default::default()
        },
    )
    .await
    .err()
    .expect("unknown provider");
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = catalog_service::update_service(
        &state,
        &user,
        service.service_id,
        UpdateServiceRequest {
            price: Some(dec!(-1)),
            ..Default::default()
        },
    )
    .await
    .err()
    .expect("negative price");
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = catalog_service::mark_deal(
        &state,
        &rival_user,
        service.service_id,
        MarkDealRequest::default(),
    )
    .await
    .err()
    .expect("foreign service");
    assert!(matches!(err, AppError::Forbidden));

    let dealt =
        catalog_service::mark_deal(&state, &user, service.service_id, MarkDealRequest::default())
            .await?
            .data
            .expect("service");
    assert!(dealt.is_deal_of_the_day);
    assert!(!dealt.is_todays_special);

    let special = catalog_service::mark_special(
        &state,
        &user,
        service.service_id,
        MarkSpecialRequest {
            is_todays_special: Some(true),
        },
    )
    .await?
    .data
    .expect("service");
    assert!(special.is_todays_special);
    assert!(special.is_deal_of_the_day);

    let deals = catalog_service::list_deal_of_the_day(&state).await?.data.expect("deals");
    assert!(deals.items.iter().any(|s| s.service_id == service.service_id));
    assert!(deals.items.iter().all(|s| s.is_deal_of_the_day));

    let mine = catalog_service::list_services_for_provider(&state, &user)
        .await?
        .data
        .expect("services");
    assert_eq!(mine.items.len(), 1);

    let err = catalog_service::mark_special(
        &state,
        &user,
        i32::MAX,
        MarkSpecialRequest::default(),
    )
    .await
    .err()
    .expect("missing service");
    assert!(matches!(err, AppError::NotFound));

    let err = catalog_service::mark_deal(&state, &user, i32::MAX, MarkDealRequest::default())
        .await
        .err()
        .expect("missing service");
    assert!(matches!(err, AppError::NotFound));

    let err = catalog_service::delete_service(&state, &rival_user, service.service_id)
        .await
        .err()
        .expect("foreign service");
    assert!(matches!(err, AppError::Forbidden));

    // Handing the service over makes the rival its owner.
    let moved = catalog_service::update_service(
        &state,
        &user,
        service.service_id,
        UpdateServiceRequest {
            provider: Some(rival.provider_id),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("service");
    assert_eq!(moved.provider, rival.provider_id);
    assert_eq!(moved.provider_name, rival.name);

    let err = catalog_service::delete_service(&state, &user, service.service_id)
        .await
        .err()
        .expect("no longer owned");
    assert!(matches!(err, AppError::Forbidden));

    catalog_service::delete_service(&state, &rival_user, service.service_id).await?;
    let err = catalog_service::get_service(&state, service.service_id)
        .await
        .err()
        .expect("deleted");
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn reviews_are_appended_in_order() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let (_provider, provider_user, _) = common::register_provider(&state).await?;
    let service = common::create_service(&state, &provider_user, "Vet Visit", "60.00").await?;
    let (_owner, owner_user, _) = common::register_owner(&state).await?;

    for text in ["Great care", "Friendly staff"] {
        review_service::add_review(
            &state,
            &owner_user,
            service.service_id,
            AddReviewRequest { review: text.into() },
        )
        .await?;
    }
    let last = review_service::add_review(
        &state,
        &owner_user,
        service.service_id,
        AddReviewRequest {
            review: "  Will book again ".into(),
        },
    )
    .await?
    .data
    .expect("reviews");
    assert_eq!(
        last.reviews,
        vec!["Great care", "Friendly staff", "Will book again"]
    );

    let err = review_service::add_review(
        &state,
        &owner_user,
        service.service_id,
        AddReviewRequest { review: "   ".into() },
    )
    .await
    .err()
    .expect("blank review");
    assert!(matches!(err, AppError::BadRequest(ref m) if m == "Review is required"));

    let err = review_service::add_review(
        &state,
        &owner_user,
        i32::MAX,
        AddReviewRequest { review: "Hello".into() },
    )
    .await
    .err()
    .expect("unknown service");
    assert!(matches!(err, AppError::NotFound));

    let fetched = catalog_service::get_service(&state, service.service_id)
        .await?
        .data
        .expect("service");
    assert_eq!(fetched.reviews.len(), 3);
    Ok(())
}

#[tokio::test]
async fn provider_sees_and_updates_orders_for_own_services() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let (_provider, provider_user, _) = common::register_provider(&state).await?;
    let (_rival, rival_user, _) = common::register_provider(&state).await?;
    let service = common::create_service(&state, &provider_user, "Boarding", "80.00").await?;

    let (owner, owner_user, _) = common::register_owner(&state).await?;
    cart_service::add_to_cart(
        &state,
        &owner_user,
        AddToCartRequest {
            service_id: service.service_id,
            scheduled_date_time: None,
        },
    )
    .await?;
    let placed = order_service::place_order(&state, &owner_user).await?.data.expect("orders");
    let order_id = placed.items[0].order_id;

    let received = provider_order_service::list_orders(&state, &provider_user)
        .await?
        .data
        .expect("orders");
    assert_eq!(received.items.len(), 1);
    assert_eq!(received.items[0].order_id, order_id);
    assert_eq!(received.items[0].owner_name, owner.owner_name);

    let rival_view = provider_order_service::list_orders(&state, &rival_user)
        .await?
        .data
        .expect("orders");
    assert!(rival_view.items.is_empty());

    let err = provider_order_service::update_order_status(
        &state,
        &rival_user,
        order_id,
        UpdateOrderStatusRequest {
            status: "Processed".into(),
        },
    )
    .await
    .err()
    .expect("foreign order");
    assert!(matches!(err, AppError::Forbidden));

    let err = provider_order_service::update_order_status(
        &state,
        &provider_user,
        order_id,
        UpdateOrderStatusRequest {
            status: "Shipped".into(),
        },
    )
    .await
    .err()
    .expect("unknown status");
    assert!(matches!(err, AppError::BadRequest(_)));

    let processed = provider_order_service::update_order_status(
        &state,
        &provider_user,
        order_id,
        UpdateOrderStatusRequest {
            status: "Processed".into(),
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(processed.status, OrderStatus::Processed);

    // Once processed the owner can no longer cancel.
    let err = order_service::cancel_order(&state, &owner_user, order_id)
        .await
        .err()
        .expect("not cancellable");
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn provider_profile_update_rehashes_password() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let (provider, user, email) = common::register_provider(&state).await?;

    let updated = provider_service::update_profile(
        &state,
        &user,
        UpdateProviderProfileRequest {
            address: Some("99 Kennel Court".into()),
            password: Some("brand-new-pass".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("provider");
    assert_eq!(updated.address, "99 Kennel Court");
    assert_eq!(updated.name, provider.name);

    let err = common::login(&state, Role::Provider, &email).await.err();
    assert!(err.is_some(), "old password must stop working");
    Ok(())
}

#[tokio::test]
async fn flag_endpoints_accept_an_empty_body() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let (_provider, user, _) = common::register_provider(&state).await?;
    let service = common::create_service(&state, &user, "Agility Class", "22.00").await?;
    let token = auth_service::issue_token(&state.auth, user.account_id, Role::Provider)?;
    let app = create_app(state);

    let response = app
        .clone()
        .oneshot(
            Request::patch(format!("/services/{}/mark_deal/", service.service_id))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["data"]["is_deal_of_the_day"], true);
    assert_eq!(body["data"]["is_todays_special"], false);

    let response = app
        .oneshot(
            Request::patch(format!("/services/{}/mark_special/", service.service_id))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"is_todays_special": "yes"}"#))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
