pub mod error;
pub mod models;
pub mod schema;
pub mod store;
pub mod validation;

pub use error::*;
pub use models::*;
pub use store::WishlistStore;
pub use validation::{
    NewUser, NewWishlistItem, UserForm, Validatable, ValidationError, WishlistItemForm,
};
