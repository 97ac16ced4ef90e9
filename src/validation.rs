//! Field checks shared by the registration, profile and catalog services.

use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};

pub const MAX_USERNAME_LEN: usize = 20;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 15;

/// Trim `value` and reject it when empty or longer than `max` characters.
pub fn required(field: &str, value: &str, max: usize) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    if trimmed.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn email(value: &str) -> AppResult<String> {
    let value = required("email", value, 254)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid || value.contains(char::is_whitespace) {
        return Err(AppError::BadRequest("Enter a valid email address".into()));
    }
    Ok(value)
}

pub fn username(value: &str) -> AppResult<String> {
    let value = required("username", value, MAX_USERNAME_LEN)?;
    if value.contains(char::is_whitespace) {
        return Err(AppError::BadRequest(
            "username must not contain whitespace".into(),
        ));
    }
    Ok(value)
}

pub fn password(value: &str) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::BadRequest("password is required".into()));
    }
    Ok(())
}

pub fn phone_number(value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.chars().count() > MAX_PHONE_LEN {
        return Err(AppError::BadRequest(format!(
            "phone_number must be at most {MAX_PHONE_LEN} characters"
        )));
    }
    Ok(value.to_string())
}

pub fn pet_age(value: i32) -> AppResult<i32> {
    if value < 0 {
        return Err(AppError::BadRequest("pet_age must be zero or greater".into()));
    }
    Ok(value)
}

/// Prices are stored as NUMERIC(10, 2).
pub fn price(value: Decimal) -> AppResult<Decimal> {
    if value < Decimal::ZERO {
        return Err(AppError::BadRequest("price must be zero or greater".into()));
    }
    if value.normalize().scale() > 2 {
        return Err(AppError::BadRequest(
            "price must have at most 2 decimal places".into(),
        ));
    }
    if value >= Decimal::from(100_000_000) {
        return Err(AppError::BadRequest(
            "price must have at most 10 digits".into(),
        ));
    }
    Ok(value.round_dp(2))
}
