#![allow(dead_code)]

use std::str::FromStr;

use petcare_api::{
    config::AuthConfig,
    db::{create_pool, run_migrations},
    dto::{
        auth::{LoginRequest, OwnerRegisterRequest, ProviderRegisterRequest},
        services::CreateServiceRequest,
    },
    middleware::auth::{AuthUser, Role, verify_token},
    models::{Owner, Provider, Service},
    services::{auth_service, catalog_service},
    state::AppState,
};
use rust_decimal::Decimal;
use uuid::Uuid;

pub const PASSWORD: &str = "s3cret-pass";

pub fn test_auth() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret".into(),
        token_ttl_hours: 1,
    }
}

/// Connect to the test database, or `None` when none is configured.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests."
            );
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url, 5).await?;
    run_migrations(&pool).await?;
    Ok(Some(AppState::new(pool, test_auth())))
}

/// Short unique suffix so repeated runs never collide on email or username.
pub fn unique() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

pub async fn register_owner(state: &AppState) -> anyhow::Result<(Owner, AuthUser, String)> {
    let tag = unique();
    let email = format!("owner-{tag}@example.com");
    let owner = auth_service::register_owner(
        state,
        OwnerRegisterRequest {
            email: email.clone(),
            username: format!("o{tag}"),
            password: PASSWORD.into(),
            owner_name: "Test Owner".into(),
            pet_name: "Biscuit".into(),
            pet_age: 4,
            animal_type: "Dog".into(),
            phone_number: Some("5550001".into()),
            address: Some("1 Test Road".into()),
        },
    )
    .await?
    .data
    .expect("owner data");
    let user = login(state, Role::Owner, &email).await?;
    Ok((owner, user, email))
}

pub async fn register_provider(state: &AppState) -> anyhow::Result<(Provider, AuthUser, String)> {
    let tag = unique();
    let email = format!("provider-{tag}@example.com");
    let provider = auth_service::register_provider(
        state,
        ProviderRegisterRequest {
            email: email.clone(),
            username: format!("p{tag}"),
            password: PASSWORD.into(),
            name: format!("Provider {tag}"),
            phone_number: None,
            address: None,
        },
    )
    .await?
    .data
    .expect("provider data");
    let user = login(state, Role::Provider, &email).await?;
    Ok((provider, user, email))
}

pub async fn login(state: &AppState, role: Role, email: &str) -> anyhow::Result<AuthUser> {
    let token = auth_service::login(
        state,
        role,
        LoginRequest {
            email: email.into(),
            password: PASSWORD.into(),
        },
    )
    .await?
    .data
    .expect("login data")
    .token;
    Ok(verify_token(&token, &state.auth.jwt_secret)?)
}

pub async fn create_service(
    state: &AppState,
    provider: &AuthUser,
    name: &str,
    price: &str,
) -> anyhow::Result<Service> {
    let service = catalog_service::create_service(
        state,
        provider,
        CreateServiceRequest {
            service_name: name.into(),
            description: format!("{name} description"),
            price: Decimal::from_str(price)?,
            is_deal_of_the_day: false,
            is_todays_special: false,
        },
    )
    .await?
    .data
    .expect("service data");
    Ok(service)
}
