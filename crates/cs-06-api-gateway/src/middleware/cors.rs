//! CORS for card embeds.
//!
//! Cards are rendered on third-party pages, so the default config admits any
//! origin. A `"*"` entry in origins or headers means "any".

use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::domain::config::CorsConfig;

/// Build the CORS layer. A disabled config yields a very permissive layer.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::very_permissive();
    }

    let origin = if is_wildcard(&config.allowed_origins) {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_entries::<HeaderValue>("origin", &config.allowed_origins))
    };
    let headers = if is_wildcard(&config.allowed_headers) {
        AllowHeaders::any()
    } else {
        AllowHeaders::list(parse_entries::<HeaderName>("header", &config.allowed_headers))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_headers(headers)
        .allow_methods(parse_entries::<Method>("method", &config.allowed_methods))
        .max_age(Duration::from_secs(config.max_age))
}

fn is_wildcard(entries: &[String]) -> bool {
    entries.iter().any(|e| e == "*")
}

/// Unparsable entries are skipped with a warning.
fn parse_entries<T: FromStr>(what: &str, entries: &[String]) -> Vec<T> {
    entries
        .iter()
        .filter_map(|entry| match entry.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(entry = %entry, "Ignoring invalid CORS {}", what);
                None
            }
        })
        .collect()
}
