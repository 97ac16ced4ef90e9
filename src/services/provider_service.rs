use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};

use crate::{
    dto::profiles::UpdateProviderProfileRequest,
    entity::{
        accounts::{self, Entity as Accounts},
        providers::{self, Column as ProviderCol, Entity as Providers},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_provider},
    models::Provider,
    response::{ApiResponse, Meta},
    services::auth_service::{ensure_email_available, ensure_username_available, hash_password},
    state::AppState,
    validation,
};

/// Load the provider profile behind the caller's token.
pub async fn resolve_provider(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<providers::Model> {
    ensure_provider(user)?;
    Providers::find()
        .filter(ProviderCol::AccountId.eq(user.account_id))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Provider>> {
    ensure_provider(user)?;
    let found = Providers::find()
        .filter(ProviderCol::AccountId.eq(user.account_id))
        .find_also_related(Accounts)
        .one(&state.orm)
        .await?;
    let (provider, account) = match found {
        Some((provider, Some(account))) => (provider, account),
        _ => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Provider profile",
        provider_from_entity(provider, account),
        Some(Meta::empty()),
    ))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProviderProfileRequest,
) -> AppResult<ApiResponse<Provider>> {
    ensure_provider(user)?;
    let txn = state.orm.begin().await?;
    let found = Providers::find()
        .filter(ProviderCol::AccountId.eq(user.account_id))
        .find_also_related(Accounts)
        .one(&txn)
        .await?;
    let (provider, account) = match found {
        Some((provider, Some(account))) => (provider, account),
        _ => return Err(AppError::NotFound),
    };

    let mut account_active: accounts::ActiveModel = account.clone().into();
    if let Some(email) = payload.email.filter(|e| *e != account.email) {
        let email = validation::email(&email)?;
        if email != account.email {
            ensure_email_available(&txn, &email).await?;
            account_active.email = Set(email);
        }
    }
    if let Some(username) = payload.username.filter(|u| *u != account.username) {
        let username = validation::username(&username)?;
        if username != account.username {
            ensure_username_available(&txn, &username).await?;
            account_active.username = Set(username);
        }
    }
    if let Some(phone_number) = payload.phone_number {
        account_active.phone_number = Set(validation::phone_number(&phone_number)?);
    }
    if let Some(address) = payload.address {
        account_active.address = Set(address);
    }
    if let Some(password) = payload.password {
        validation::password(&password)?;
        account_active.password_hash = Set(hash_password(&password)?);
    }

    let unchanged_provider = provider.clone();
    let mut provider_active: providers::ActiveModel = provider.into();
    if let Some(name) = payload.name {
        provider_active.name = Set(validation::required(
            "name",
            &name,
            validation::MAX_NAME_LEN,
        )?);
    }

    let account = if account_active.is_changed() {
        account_active.update(&txn).await?
    } else {
        account
    };
    let provider = if provider_active.is_changed() {
        provider_active.update(&txn).await?
    } else {
        unchanged_provider
    };

    txn.commit().await?;

    tracing::debug!(provider_id = provider.provider_id, "provider profile updated");

    Ok(ApiResponse::success(
        "Updated",
        provider_from_entity(provider, account),
        Some(Meta::empty()),
    ))
}

pub fn provider_from_entity(provider: providers::Model, account: accounts::Model) -> Provider {
    Provider {
        provider_id: provider.provider_id,
        name: provider.name,
        email: account.email,
        phone_number: account.phone_number,
        address: account.address,
        username: account.username,
    }
}
