//! Form validation for wishlist items and user registration
//!
//! Raw form fields arrive as strings. Each form type implements
//! [`Validatable`], turning itself into a typed record that is safe to hand
//! to the store, or into the first [`ValidationError`] encountered.
//!
//! Checks are limited to lengths and parseability. Whether a referenced user
//! actually exists is left to the store's foreign key.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ITEM_NAME_MAX_CHARS: usize = 100;
pub const URL_MAX_CHARS: usize = 500;
pub const USERNAME_MAX_CHARS: usize = 40;

/// A rejected form field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Trait for raw inputs that can be checked and converted into a typed record
pub trait Validatable: Sized {
    type Output;

    fn validate(self) -> Result<Self::Output, ValidationError>;
}

/// Validate string length (in characters) within bounds
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        return Err(format!("must be at least {} characters", min));
    }
    if len > max {
        return Err(format!("must be at most {} characters", max));
    }
    Ok(())
}

/// Parse a price. Must be a finite, non-negative number.
pub fn parse_price(value: &str) -> Result<f64, String> {
    let price = value
        .parse::<f64>()
        .map_err(|_| "invalid price".to_string())?;

    if !price.is_finite() {
        return Err("invalid price".to_string());
    }
    if price < 0.0 {
        return Err("price must not be negative".to_string());
    }
    Ok(price)
}

/// Parse a user reference
pub fn parse_user_id(value: &str) -> Result<i64, String> {
    value
        .parse::<i64>()
        .map_err(|_| "invalid user id".to_string())
}

/// Raw wishlist form as posted by the browser
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WishlistItemForm {
    pub itemname: String,
    pub price: String,
    pub url: String,
    pub user: String,
}

/// Wishlist item that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewWishlistItem {
    pub item_name: String,
    pub price: f64,
    pub url: String,
    pub user_id: i64,
}

impl Validatable for WishlistItemForm {
    type Output = NewWishlistItem;

    fn validate(self) -> Result<NewWishlistItem, ValidationError> {
        validate_length(&self.itemname, 1, ITEM_NAME_MAX_CHARS).map_err(|_| {
            ValidationError::new(
                "itemname",
                format!(
                    "item name needs to be between 1-{} characters",
                    ITEM_NAME_MAX_CHARS
                ),
            )
        })?;

        let price = parse_price(&self.price).map_err(|e| ValidationError::new("price", e))?;

        validate_length(&self.url, 0, URL_MAX_CHARS).map_err(|_| {
            ValidationError::new(
                "url",
                format!("url needs to be at most {} characters", URL_MAX_CHARS),
            )
        })?;

        let user_id = parse_user_id(&self.user).map_err(|e| ValidationError::new("user", e))?;

        Ok(NewWishlistItem {
            item_name: self.itemname,
            price,
            url: self.url,
            user_id,
        })
    }
}

/// Raw registration form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
}

impl Validatable for UserForm {
    type Output = NewUser;

    fn validate(self) -> Result<NewUser, ValidationError> {
        validate_length(&self.username, 1, USERNAME_MAX_CHARS).map_err(|_| {
            ValidationError::new(
                "username",
                format!(
                    "username needs to be between 1-{} characters",
                    USERNAME_MAX_CHARS
                ),
            )
        })?;

        Ok(NewUser {
            name: self.username,
        })
    }
}
