use anyhow::Result;
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;
use crate::metrics;

pub const DEFAULT_LOG_FILTER: &str = "wantbox_api=debug,wantbox_shared=debug,tower_http=debug";

pub struct Observability {
    pub registry: Registry,
}

impl Observability {
    /// Install the global tracing subscriber and build the metrics registry.
    /// Call once per process.
    pub fn init(format: LogFormat) -> Result<Self> {
        let registry = new_registry()?;

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

        match format {
            LogFormat::Json => tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?,
            LogFormat::Text => tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()?,
        }

        tracing::info!(?format, "Observability stack initialized");
        Ok(Self { registry })
    }
}

/// Registry with every wantbox metric registered under the `wantbox` prefix
pub fn new_registry() -> prometheus::Result<Registry> {
    let registry = Registry::new_custom(Some("wantbox".into()), None)?;
    metrics::register_all(&registry)?;
    Ok(registry)
}
