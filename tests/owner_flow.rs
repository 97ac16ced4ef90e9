mod common;

use chrono::{Duration, Utc};
use petcare_api::{
    dto::{
        auth::LoginRequest,
        cart::{AddToCartRequest, UpdateScheduledTimeRequest},
        favorites::AddFavoriteRequest,
        orders::OrderSearchQuery,
        profiles::UpdateOwnerProfileRequest,
    },
    error::AppError,
    middleware::auth::Role,
    models::OrderStatus,
    services::{auth_service, cart_service, favorite_service, order_service, owner_service},
};

#[tokio::test]
async fn registration_hashes_password_and_login_is_role_scoped() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let (owner, _user, email) = common::register_owner(&state).await?;
    assert_eq!(owner.email, email);
    assert_eq!(owner.pet_age, 4);

    let (stored,): (String,) = sqlx::query_as("SELECT password_hash FROM accounts WHERE email = $1")
        .bind(&email)
        .fetch_one(&state.pool)
        .await?;
    assert_ne!(stored, common::PASSWORD);
    assert!(auth_service::verify_password(common::PASSWORD, &stored)?);

    // Same credentials through the provider endpoint are rejected.
    let err = auth_service::login(
        &state,
        Role::Provider,
        LoginRequest {
            email: email.clone(),
            password: common::PASSWORD.into(),
        },
    )
    .await
    .err()
    .expect("wrong role must fail");
    assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid credentials"));

    let err = auth_service::login(
        &state,
        Role::Owner,
        LoginRequest {
            email,
            password: "wrong".into(),
        },
    )
    .await
    .err()
    .expect("wrong password must fail");
    assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid credentials"));
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_rejected() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let (_owner, _user, email) = common::register_owner(&state).await?;

    let err = auth_service::register_provider(
        &state,
        petcare_api::dto::auth::ProviderRegisterRequest {
            email,
            username: format!("p{}", common::unique()),
            password: common::PASSWORD.into(),
            name: "Copycat".into(),
            phone_number: None,
            address: None,
        },
    )
    .await
    .err()
    .expect("duplicate email must fail");
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn profile_update_is_partial() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let (owner, user, _email) = common::register_owner(&state).await?;

    let updated = owner_service::update_profile(
        &state,
        &user,
        UpdateOwnerProfileRequest {
            pet_name: Some("Waffles".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("profile");
    assert_eq!(updated.pet_name, "Waffles");
    assert_eq!(updated.owner_name, owner.owner_name);
    assert_eq!(updated.email, owner.email);

    let err = owner_service::update_profile(
        &state,
        &user,
        UpdateOwnerProfileRequest {
            pet_age: Some(-1),
            ..Default::default()
        },
    )
    .await
    .err()
    .expect("negative age must fail");
    assert!(matches!(err, AppError::BadRequest(_)));

    let profile = owner_service::get_profile(&state, &user).await?.data.expect("profile");
    assert_eq!(profile.pet_name, "Waffles");
    assert_eq!(profile.pet_age, owner.pet_age);
    Ok(())
}

#[tokio::test]
async fn cart_checkout_cancel_and_search() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let (_provider, provider_user, _) = common::register_provider(&state).await?;
    let tag = common::unique();
    let groom_name = format!("Groom {tag}");
    let walk_name = format!("Walk {tag}");
    let groom = common::create_service(&state, &provider_user, &groom_name, "40.00").await?;
    let walk = common::create_service(&state, &provider_user, &walk_name, "12.50").await?;

    let (owner, user, _) = common::register_owner(&state).await?;

    let err = order_service::place_order(&state, &user)
        .await
        .err()
        .expect("empty cart must fail");
    assert!(matches!(err, AppError::BadRequest(ref m) if m == "No items in cart"));

    let when = Utc::now() + Duration::days(2);
    let first = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            service_id: groom.service_id,
            scheduled_date_time: Some(when),
        },
    )
    .await?
    .data
    .expect("cart item");
    assert_eq!(first.owner_id, owner.owner_id);
    assert_eq!(first.service_name, groom.service_name);
    assert_eq!(first.service_charges, groom.price);
    assert_eq!(first.service_provider_name, groom.provider_name);

    cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            service_id: walk.service_id,
            scheduled_date_time: None,
        },
    )
    .await?;

    let later = when + Duration::hours(3);
    let moved = cart_service::update_scheduled_time(
        &state,
        &user,
        first.cart_id,
        UpdateScheduledTimeRequest {
            scheduled_date_time: later,
        },
    )
    .await?
    .data
    .expect("cart item");
    assert_eq!(moved.scheduled_date_time.timestamp(), later.timestamp());

    let err = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            service_id: i32::MAX,
            scheduled_date_time: None,
        },
    )
    .await
    .err()
    .expect("unknown service must fail");
    assert!(matches!(err, AppError::NotFound));

    let cart = cart_service::list_cart(&state, &user).await?.data.expect("cart");
    assert_eq!(cart.items.len(), 2);

    let placed = order_service::place_order(&state, &user).await?.data.expect("orders");
    assert_eq!(placed.items.len(), 2);
    assert!(placed.items.iter().all(|o| o.status == OrderStatus::Placed));
    assert_eq!(placed.items[0].service_id, groom.service_id);
    assert_eq!(placed.items[0].scheduled_date_time.timestamp(), later.timestamp());

    let cart = cart_service::list_cart(&state, &user).await?.data.expect("cart");
    assert!(cart.items.is_empty());

    let order_id = placed.items[0].order_id;
    let cancelled = order_service::cancel_order(&state, &user, order_id)
        .await?
        .data
        .expect("order");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    let err = order_service::cancel_order(&state, &user, order_id)
        .await
        .err()
        .expect("second cancel must fail");
    assert!(matches!(err, AppError::BadRequest(ref m) if m == "Order cannot be cancelled"));

    let status = order_service::get_order(&state, &user, order_id).await?.data.expect("order");
    assert_eq!(status.status, OrderStatus::Cancelled);

    let found = order_service::search_orders(
        &state,
        &user,
        OrderSearchQuery {
            service_name: Some(format!("walk {tag}").to_uppercase()),
        },
    )
    .await?
    .data
    .expect("orders");
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].service_id, walk.service_id);

    let err = order_service::search_orders(
        &state,
        &user,
        OrderSearchQuery {
            service_name: Some("no-such-service-%".into()),
        },
    )
    .await
    .err()
    .expect("no match is a 404");
    assert!(matches!(err, AppError::NotFound));

    let all = order_service::list_orders(&state, &user).await?.data.expect("orders");
    assert_eq!(all.items.len(), 2);
    Ok(())
}

#[tokio::test]
async fn other_owners_rows_look_missing() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let (_provider, provider_user, _) = common::register_provider(&state).await?;
    let service = common::create_service(&state, &provider_user, "Nail Trim", "9.99").await?;

    let (_alice, alice, _) = common::register_owner(&state).await?;
    let (_bob, bob, _) = common::register_owner(&state).await?;

    let item = cart_service::add_to_cart(
        &state,
        &alice,
        AddToCartRequest {
            service_id: service.service_id,
            scheduled_date_time: None,
        },
    )
    .await?
    .data
    .expect("cart item");

    let err = cart_service::remove_from_cart(&state, &bob, item.cart_id)
        .await
        .err()
        .expect("foreign cart row");
    assert!(matches!(err, AppError::NotFound));

    let placed = order_service::place_order(&state, &alice).await?.data.expect("orders");
    let order_id = placed.items[0].order_id;

    let err = order_service::cancel_order(&state, &bob, order_id)
        .await
        .err()
        .expect("foreign order");
    assert!(matches!(err, AppError::NotFound));

    let err = order_service::get_order(&state, &bob, order_id)
        .await
        .err()
        .expect("foreign order");
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn favorites_add_list_remove() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let (_provider, provider_user, _) = common::register_provider(&state).await?;
    let service = common::create_service(&state, &provider_user, "Pet Taxi", "18.00").await?;
    let (owner, user, _) = common::register_owner(&state).await?;

    let favorite = favorite_service::add_favorite(
        &state,
        &user,
        AddFavoriteRequest {
            service_id: service.service_id,
        },
    )
    .await?
    .data
    .expect("favorite");
    assert_eq!(favorite.owner_id, owner.owner_id);
    assert_eq!(favorite.service_name, service.service_name);

    let list = favorite_service::list_favorites(&state, &user).await?.data.expect("favorites");
    assert_eq!(list.items.len(), 1);

    favorite_service::remove_favorite(&state, &user, favorite.favorites_id).await?;
    let list = favorite_service::list_favorites(&state, &user).await?.data.expect("favorites");
    assert!(list.items.is_empty());

    let err = favorite_service::remove_favorite(&state, &user, favorite.favorites_id)
        .await
        .err()
        .expect("already removed");
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}
