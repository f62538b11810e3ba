use once_cell::sync::Lazy;
use prometheus::{
    opts, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Registry, TextEncoder,
};

macro_rules! counter_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| IntCounterVec::new(opts!($name, $help), $labels).unwrap())
    };
}
macro_rules! histogram_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| {
            HistogramVec::new(HistogramOpts::new($name, $help).buckets(LATENCY_BUCKETS.to_vec()), $labels)
                .unwrap()
        })
    };
}
macro_rules! counter {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntCounter::new($name, $help).unwrap())
    };
}

const LATENCY_BUCKETS: [f64; 11] = [
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

// ── HTTP ────────────────────────────────────────────────────────────────────
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("http_requests_total", "Total HTTP requests", &["method", "path", "status"]);
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> =
    histogram_vec!("http_request_duration_seconds", "HTTP request latency", &["method", "path"]);

// ── Wishlist ────────────────────────────────────────────────────────────────
pub static ITEMS_CREATED: Lazy<IntCounter> =
    counter!("wishlist_items_created_total", "Wishlist items created");
pub static ITEMS_UPDATED: Lazy<IntCounter> =
    counter!("wishlist_items_updated_total", "Wishlist item updates applied");
pub static ITEMS_DELETED: Lazy<IntCounter> =
    counter!("wishlist_items_deleted_total", "Wishlist item deletions applied");
pub static USERS_REGISTERED: Lazy<IntCounter> =
    counter!("users_registered_total", "Users registered");

// ── Failures ────────────────────────────────────────────────────────────────
pub static VALIDATION_FAILURES: Lazy<IntCounterVec> =
    counter_vec!("validation_failures_total", "Rejected form submissions", &["form"]);
pub static STORAGE_ERRORS: Lazy<IntCounterVec> =
    counter_vec!("storage_errors_total", "Failed store operations", &["operation"]);

pub fn register_all(r: &Registry) -> prometheus::Result<()> {
    r.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    r.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    r.register(Box::new(ITEMS_CREATED.clone()))?;
    r.register(Box::new(ITEMS_UPDATED.clone()))?;
    r.register(Box::new(ITEMS_DELETED.clone()))?;
    r.register(Box::new(USERS_REGISTERED.clone()))?;
    r.register(Box::new(VALIDATION_FAILURES.clone()))?;
    r.register(Box::new(STORAGE_ERRORS.clone()))?;
    Ok(())
}

pub fn gather_metrics(r: &Registry) -> String {
    let encoder = TextEncoder::new();
    let families = r.gather();
    let mut buf = Vec::new();
    encoder.encode(&families, &mut buf).unwrap_or_default();
    String::from_utf8(buf).unwrap_or_default()
}

pub fn observe_http(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_registry() -> Registry {
        let r = Registry::new_custom(Some("t".into()), None).unwrap();
        register_all(&r).unwrap();
        r
    }

    #[test]
    fn test_http_request_counter() {
        let r = fresh_registry();
        observe_http("GET", "/", 200, 0.002);
        let text = gather_metrics(&r);
        assert!(text.contains("t_http_requests_total"));
        assert!(text.contains("t_http_request_duration_seconds"));
    }

    #[test]
    fn test_metric_names_prefixed() {
        let r = fresh_registry();
        ITEMS_CREATED.inc();
        VALIDATION_FAILURES.with_label_values(&["wishlist_item"]).inc();
        STORAGE_ERRORS.with_label_values(&["list wishlist items"]).inc();
        for fam in r.gather() {
            assert!(
                fam.get_name().starts_with("t_"),
                "metric {} missing prefix",
                fam.get_name()
            );
        }
    }
}
