use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    config::AuthConfig,
    dto::auth::{Claims, LoginRequest, LoginResponse, OwnerRegisterRequest, ProviderRegisterRequest},
    entity::{
        accounts::{self, Column as AccountCol, Entity as Accounts},
        owners, providers,
    },
    error::{AppError, AppResult},
    middleware::auth::Role,
    models::{Owner, Provider},
    response::{ApiResponse, Meta},
    services::{owner_service::owner_from_entity, provider_service::provider_from_entity},
    state::AppState,
    validation,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn register_owner(
    state: &AppState,
    payload: OwnerRegisterRequest,
) -> AppResult<ApiResponse<Owner>> {
    let email = validation::email(&payload.email)?;
    let username = validation::username(&payload.username)?;
    validation::password(&payload.password)?;
    let owner_name =
        validation::required("owner_name", &payload.owner_name, validation::MAX_NAME_LEN)?;
    let pet_name = validation::required("pet_name", &payload.pet_name, validation::MAX_NAME_LEN)?;
    let animal_type = validation::required("animal_type", &payload.animal_type, 50)?;
    let pet_age = validation::pet_age(payload.pet_age)?;
    let phone_number =
        validation::phone_number(payload.phone_number.as_deref().unwrap_or_default())?;
    let address = payload.address.unwrap_or_default();

    let password_hash = hash_password(&payload.password)?;

    let txn = state.orm.begin().await?;
    ensure_email_available(&txn, &email).await?;
    ensure_username_available(&txn, &username).await?;

    let account = accounts::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        username: Set(username),
        password_hash: Set(password_hash),
        phone_number: Set(phone_number),
        address: Set(address),
        role: Set(Role::Owner.as_str().to_string()),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let owner = owners::ActiveModel {
        owner_id: NotSet,
        account_id: Set(account.id),
        owner_name: Set(owner_name),
        pet_name: Set(pet_name),
        pet_age: Set(pet_age),
        animal_type: Set(animal_type),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(account_id = %account.id, owner_id = owner.owner_id, "owner registered");
    audit::record(
        &state.pool,
        account.id,
        "owner_register",
        "owners",
        serde_json::json!({ "owner_id": owner.owner_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Owner created",
        owner_from_entity(owner, account),
        Some(Meta::empty()),
    ))
}

pub async fn register_provider(
    state: &AppState,
    payload: ProviderRegisterRequest,
) -> AppResult<ApiResponse<Provider>> {
    let email = validation::email(&payload.email)?;
    let username = validation::username(&payload.username)?;
    validation::password(&payload.password)?;
    let name = validation::required("name", &payload.name, validation::MAX_NAME_LEN)?;
    let phone_number =
        validation::phone_number(payload.phone_number.as_deref().unwrap_or_default())?;
    let address = payload.address.unwrap_or_default();

    let password_hash = hash_password(&payload.password)?;

    let txn = state.orm.begin().await?;
    ensure_email_available(&txn, &email).await?;
    ensure_username_available(&txn, &username).await?;

    let account = accounts::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        username: Set(username),
        password_hash: Set(password_hash),
        phone_number: Set(phone_number),
        address: Set(address),
        role: Set(Role::Provider.as_str().to_string()),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let provider = providers::ActiveModel {
        provider_id: NotSet,
        account_id: Set(account.id),
        name: Set(name),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        account_id = %account.id,
        provider_id = provider.provider_id,
        "provider registered"
    );
    audit::record(
        &state.pool,
        account.id,
        "provider_register",
        "providers",
        serde_json::json!({ "provider_id": provider.provider_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Provider created",
        provider_from_entity(provider, account),
        Some(Meta::empty()),
    ))
}

/// Exchange credentials for a token. Every failure, including a login
/// through the other role's endpoint, reports the same message.
pub async fn login(
    state: &AppState,
    role: Role,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let account = Accounts::find()
        .filter(AccountCol::Email.eq(email.trim()))
        .one(&state.orm)
        .await?;

    let account = match account {
        Some(a) if a.role == role.as_str() => a,
        _ => return Err(AppError::BadRequest(INVALID_CREDENTIALS.into())),
    };

    if !verify_password(&password, &account.password_hash)? {
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    }

    let token = issue_token(&state.auth, account.id, role)?;

    audit::record(
        &state.pool,
        account.id,
        "login",
        "accounts",
        serde_json::json!({ "role": role.as_str() }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse { token },
        Some(Meta::empty()),
    ))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(auth: &AuthConfig, account_id: Uuid, role: Role) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(auth.token_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: account_id.to_string(),
        role: role.as_str().to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub(crate) async fn ensure_email_available<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> AppResult<()> {
    let taken = Accounts::find()
        .filter(AccountCol::Email.eq(email))
        .one(db)
        .await?;
    if taken.is_some() {
        return Err(AppError::BadRequest("Email is already taken".into()));
    }
    Ok(())
}

pub(crate) async fn ensure_username_available<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> AppResult<()> {
    let taken = Accounts::find()
        .filter(AccountCol::Username.eq(username))
        .one(db)
        .await?;
    if taken.is_some() {
        return Err(AppError::BadRequest("Username is already taken".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::verify_token;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".into(),
            token_ttl_hours: 1,
        }
    }

    #[test]
    fn hash_is_not_plaintext_and_verifies() {
        let hash = hash_password("p").unwrap();
        assert_ne!(hash, "p");
        assert!(verify_password("p", &hash).unwrap());
        assert!(!verify_password("q", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_internal_error() {
        let err = verify_password("p", "not-a-hash").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn issued_token_resolves_account_and_role() {
        let config = auth_config();
        let account_id = Uuid::new_v4();
        let token = issue_token(&config, account_id, Role::Provider).unwrap();

        let user = verify_token(&token, &config.jwt_secret).unwrap();
        assert_eq!(user.account_id, account_id);
        assert_eq!(user.role, Role::Provider);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token(&auth_config(), Uuid::new_v4(), Role::Owner).unwrap();
        let err = verify_token(&token, "other-secret").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
