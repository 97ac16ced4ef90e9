use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};

use crate::{
    dto::profiles::UpdateOwnerProfileRequest,
    entity::{
        accounts::{self, Entity as Accounts},
        owners::{self, Column as OwnerCol, Entity as Owners},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner},
    models::Owner,
    response::{ApiResponse, Meta},
    services::auth_service::ensure_email_available,
    state::AppState,
    validation,
};

/// Load the owner profile behind the caller's token.
pub async fn resolve_owner(state: &AppState, user: &AuthUser) -> AppResult<owners::Model> {
    ensure_owner(user)?;
    Owners::find()
        .filter(OwnerCol::AccountId.eq(user.account_id))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Owner>> {
    ensure_owner(user)?;
    let found = Owners::find()
        .filter(OwnerCol::AccountId.eq(user.account_id))
        .find_also_related(Accounts)
        .one(&state.orm)
        .await?;
    let (owner, account) = match found {
        Some((owner, Some(account))) => (owner, account),
        _ => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Owner profile",
        owner_from_entity(owner, account),
        Some(Meta::empty()),
    ))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateOwnerProfileRequest,
) -> AppResult<ApiResponse<Owner>> {
    ensure_owner(user)?;
    let txn = state.orm.begin().await?;
    let found = Owners::find()
        .filter(OwnerCol::AccountId.eq(user.account_id))
        .find_also_related(Accounts)
        .one(&txn)
        .await?;
    let (owner, account) = match found {
        Some((owner, Some(account))) => (owner, account),
        _ => return Err(AppError::NotFound),
    };

    let mut account_active: accounts::ActiveModel = account.clone().into();
    // An unchanged email is not re-checked for uniqueness.
    if let Some(email) = payload.email.filter(|e| *e != account.email) {
        let email = validation::email(&email)?;
        if email != account.email {
            ensure_email_available(&txn, &email).await?;
            account_active.email = Set(email);
        }
    }
    if let Some(phone_number) = payload.phone_number {
        account_active.phone_number = Set(validation::phone_number(&phone_number)?);
    }
    if let Some(address) = payload.address {
        account_active.address = Set(address);
    }

    let unchanged_owner = owner.clone();
    let mut owner_active: owners::ActiveModel = owner.into();
    if let Some(owner_name) = payload.owner_name {
        owner_active.owner_name = Set(validation::required(
            "owner_name",
            &owner_name,
            validation::MAX_NAME_LEN,
        )?);
    }
    if let Some(pet_name) = payload.pet_name {
        owner_active.pet_name = Set(validation::required(
            "pet_name",
            &pet_name,
            validation::MAX_NAME_LEN,
        )?);
    }
    if let Some(pet_age) = payload.pet_age {
        owner_active.pet_age = Set(validation::pet_age(pet_age)?);
    }
    if let Some(animal_type) = payload.animal_type {
        owner_active.animal_type = Set(validation::required("animal_type", &animal_type, 50)?);
    }

    let account = if account_active.is_changed() {
        account_active.update(&txn).await?
    } else {
        account
    };
    let owner = if owner_active.is_changed() {
        owner_active.update(&txn).await?
    } else {
        unchanged_owner
    };

    txn.commit().await?;

    tracing::debug!(owner_id = owner.owner_id, "owner profile updated");

    Ok(ApiResponse::success(
        "Updated",
        owner_from_entity(owner, account),
        Some(Meta::empty()),
    ))
}

pub fn owner_from_entity(owner: owners::Model, account: accounts::Model) -> Owner {
    Owner {
        owner_id: owner.owner_id,
        username: account.username,
        owner_name: owner.owner_name,
        pet_name: owner.pet_name,
        email: account.email,
        address: account.address,
        phone_number: account.phone_number,
        pet_age: owner.pet_age,
        animal_type: owner.animal_type,
    }
}
