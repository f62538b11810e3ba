//! SQLite-backed persistence for users and wishlist items.
//!
//! A [`WishlistStore`] wraps a connection pool and is handed explicitly to
//! whoever needs it. Each call checks out a connection for a single
//! parameterized statement and returns it when the call completes.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::models::{User, WishlistEntry, WishlistItem};
use crate::schema::SCHEMA;
use crate::validation::{NewUser, NewWishlistItem};

pub const IN_MEMORY_URL: &str = "sqlite::memory:";

#[derive(Clone)]
pub struct WishlistStore {
    pool: SqlitePool,
}

impl WishlistStore {
    pub fn new(pool: SqlitePool) -> Self {
        WishlistStore { pool }
    }

    /// Connect to `database_url`, creating the file if needed.
    ///
    /// Foreign keys are switched on for every connection. An in-memory
    /// database only lives as long as its connection, so those URLs get a
    /// single connection that is never recycled.
    pub async fn open(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        info!(database_url, "Database pool opened");
        Ok(Self::new(pool))
    }

    /// Fresh private database with the schema already applied
    pub async fn open_in_memory() -> StoreResult<Self> {
        let store = Self::open(IN_MEMORY_URL, 1).await?;
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn init_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("Schema initialized");
        Ok(())
    }

    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert a wishlist item and return its id
    pub async fn create_item(&self, item: &NewWishlistItem) -> StoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO wishlist (itemname, price, url, user_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&item.item_name)
        .bind(item.price)
        .bind(&item.url)
        .bind(item.user_id)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, user_id = item.user_id, "Wishlist item created");
        Ok(id)
    }

    /// Overwrite every editable field of item `id`.
    ///
    /// An unknown id matches no rows and is not an error.
    pub async fn update_item(&self, id: i64, item: &NewWishlistItem) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE wishlist SET itemname = ?, price = ?, url = ?, user_id = ? WHERE id = ?",
        )
        .bind(&item.item_name)
        .bind(item.price)
        .bind(&item.url)
        .bind(item.user_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(id, "Update matched no wishlist item");
        } else {
            debug!(id, "Wishlist item updated");
        }
        Ok(())
    }

    /// Delete item `id`. An unknown id is not an error.
    pub async fn delete_item(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM wishlist WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!(id, "Delete matched no wishlist item");
        } else {
            debug!(id, "Wishlist item deleted");
        }
        Ok(())
    }

    pub async fn get_item(&self, id: i64) -> StoreResult<WishlistItem> {
        sqlx::query_as::<_, WishlistItem>(
            "SELECT id, itemname, price, url, user_id, timestamp FROM wishlist WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "wishlist item",
            id,
        })
    }

    /// All items with their owner's name, in insertion order
    pub async fn list_items(&self) -> StoreResult<Vec<WishlistEntry>> {
        let rows = sqlx::query_as::<_, WishlistEntry>(
            r#"
            SELECT wishlist.id, wishlist.itemname, wishlist.price, wishlist.url,
                   wishlist.user_id, wishlist.timestamp, users.name AS owner_name
            FROM wishlist
            INNER JOIN users ON users.id = wishlist.user_id
            ORDER BY wishlist.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_items(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM wishlist")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn create_user(&self, user: &NewUser) -> StoreResult<i64> {
        let result = sqlx::query("INSERT INTO users (name) VALUES (?)")
            .bind(&user.name)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(id, "User created");
        Ok(id)
    }

    pub async fn list_users(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>("SELECT id, name FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn count_users(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:wantbox?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://wantbox.db"));
    }
}
