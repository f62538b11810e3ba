use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered person who can own wishlist items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// A single row of the `wishlist` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WishlistItem {
    pub id: i64,
    #[sqlx(rename = "itemname")]
    #[serde(rename = "itemname")]
    pub item_name: String,
    pub url: String,
    pub price: f64,
    pub user_id: i64,
    /// Filled by the store's `CURRENT_TIMESTAMP` default (UTC)
    #[sqlx(rename = "timestamp")]
    pub created_at: NaiveDateTime,
}

/// Wishlist item joined with the display name of its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WishlistEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub item: WishlistItem,
    #[serde(rename = "username")]
    pub owner_name: String,
}
