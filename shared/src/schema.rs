//! SQL DDL for bootstrapping the SQLite database.
//!
//! Both statements are idempotent. `users` must exist before `wishlist`
//! because of the foreign key.

pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)
"#;

pub const CREATE_WISHLIST_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS wishlist (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    itemname TEXT NOT NULL,
    price REAL NOT NULL,
    url TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (user_id) REFERENCES users (id)
)
"#;

pub const SCHEMA: [&str; 2] = [CREATE_USERS_TABLE, CREATE_WISHLIST_TABLE];
