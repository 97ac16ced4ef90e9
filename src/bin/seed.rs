use std::str::FromStr;

use petcare_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    dto::{
        auth::{LoginRequest, OwnerRegisterRequest, ProviderRegisterRequest},
        services::CreateServiceRequest,
    },
    error::AppError,
    middleware::auth::{AuthUser, Role, verify_token},
    services::{auth_service, catalog_service},
    state::AppState,
};
use rust_decimal::Decimal;

const DEMO_PASSWORD: &str = "petcare123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    run_migrations(&pool).await?;
    let state = AppState::new(pool, config.auth.clone());

    let provider = ensure_provider(&state, "provider@example.com").await?;
    seed_services(&state, &provider).await?;
    let owner = ensure_owner(&state, "owner@example.com").await?;

    println!(
        "Seed completed. Provider account: {}, Owner account: {}",
        provider.account_id, owner.account_id
    );
    Ok(())
}

async fn ensure_provider(state: &AppState, email: &str) -> anyhow::Result<AuthUser> {
    let created = auth_service::register_provider(
        state,
        ProviderRegisterRequest {
            email: email.to_string(),
            username: "happypaws".to_string(),
            password: DEMO_PASSWORD.to_string(),
            name: "Happy Paws Grooming".to_string(),
            phone_number: Some("5550100".to_string()),
            address: Some("12 Bark Street".to_string()),
        },
    )
    .await;
    skip_existing(created.map(|_| ()), email)?;
    sign_in(state, Role::Provider, email).await
}

async fn ensure_owner(state: &AppState, email: &str) -> anyhow::Result<AuthUser> {
    let created = auth_service::register_owner(
        state,
        OwnerRegisterRequest {
            email: email.to_string(),
            username: "rexowner".to_string(),
            password: DEMO_PASSWORD.to_string(),
            owner_name: "Sam Doe".to_string(),
            pet_name: "Rex".to_string(),
            pet_age: 3,
            animal_type: "Dog".to_string(),
            phone_number: Some("5550199".to_string()),
            address: Some("7 Meadow Lane".to_string()),
        },
    )
    .await;
    skip_existing(created.map(|_| ()), email)?;
    sign_in(state, Role::Owner, email).await
}

// Registration conflicts mean an earlier run already seeded the account.
fn skip_existing(result: Result<(), AppError>, email: &str) -> anyhow::Result<()> {
    match result {
        Ok(()) => {
            println!("Created account {email}");
            Ok(())
        }
        Err(AppError::BadRequest(msg)) => {
            println!("Keeping existing account {email} ({msg})");
            Ok(())
        }
        Err(err) => Err(anyhow::anyhow!(err.to_string())),
    }
}

async fn sign_in(state: &AppState, role: Role, email: &str) -> anyhow::Result<AuthUser> {
    let resp = auth_service::login(
        state,
        role,
        LoginRequest {
            email: email.to_string(),
            password: DEMO_PASSWORD.to_string(),
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!("demo login for {email} failed: {e}"))?;
    let token = resp
        .data
        .ok_or_else(|| anyhow::anyhow!("login returned no token"))?
        .token;
    verify_token(&token, &state.auth.jwt_secret).map_err(|e| anyhow::anyhow!(e.to_string()))
}

async fn seed_services(state: &AppState, provider: &AuthUser) -> anyhow::Result<()> {
    let existing = catalog_service::list_services_for_provider(state, provider)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .data
        .map(|list| list.items.len())
        .unwrap_or(0);
    if existing > 0 {
        println!("Provider already has {existing} services");
        return Ok(());
    }

    let services = [
        ("Full Groom", "Bath, haircut and nail trim", "45.00", false, true),
        ("Dog Walking", "Thirty minute neighbourhood walk", "15.50", true, false),
        ("Cat Sitting", "Home visit with feeding and play", "20.00", false, false),
        ("Puppy Training", "One hour obedience session", "35.00", false, false),
    ];

    for (name, description, price, deal, special) in services {
        catalog_service::create_service(
            state,
            provider,
            CreateServiceRequest {
                service_name: name.to_string(),
                description: description.to_string(),
                price: Decimal::from_str(price)?,
                is_deal_of_the_day: deal,
                is_todays_special: special,
            },
        )
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    }

    println!("Seeded services");
    Ok(())
}
