use prometheus::Registry;
use std::sync::Arc;
use std::time::Instant;
use tera::Tera;
use wantbox_shared::WishlistStore;

use crate::templates;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: WishlistStore,
    pub templates: Arc<Tera>,
    pub started_at: Instant,
    pub registry: Registry,
}

impl AppState {
    pub fn new(store: WishlistStore, registry: Registry) -> Result<Self, tera::Error> {
        Ok(Self {
            store,
            templates: Arc::new(templates::load()?),
            started_at: Instant::now(),
            registry,
        })
    }
}
