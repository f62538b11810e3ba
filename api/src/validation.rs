//! Custom Axum extractor for validated form submissions
//!
//! `ValidatedForm<T>` is a drop-in replacement for `Form<T>` that parses the
//! urlencoded body into the raw form `T` and runs its [`Validatable`] checks,
//! handing the handler the typed output.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;
use wantbox_shared::{UserForm, Validatable, WishlistItemForm};

use crate::error::ApiError;
use crate::metrics;

/// Label under which rejected submissions are counted
pub trait NamedForm {
    const NAME: &'static str;
}

impl NamedForm for WishlistItemForm {
    const NAME: &'static str = "wishlist_item";
}

impl NamedForm for UserForm {
    const NAME: &'static str = "user";
}

pub struct ValidatedForm<T: Validatable>(pub T::Output);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validatable + NamedForm + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(raw) = Form::<T>::from_request(req, state).await.map_err(|err| {
            metrics::VALIDATION_FAILURES.with_label_values(&[T::NAME]).inc();
            ApiError::bad_request(format!("Invalid form submission: {}", err.body_text()))
        })?;

        raw.validate().map(ValidatedForm).map_err(|err| {
            metrics::VALIDATION_FAILURES.with_label_values(&[T::NAME]).inc();
            tracing::debug!(form = T::NAME, field = %err.field, "form rejected");
            ApiError::from(err)
        })
    }
}
