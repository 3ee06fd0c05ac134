use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;

use crate::error::{Error, Result};

/// CORS restricted to the one configured frontend origin, with credentials
/// so the session cookie travels on cross-origin requests.
pub fn frontend_cors(frontend_url: &str) -> Result<CorsLayer> {
    let origin = frontend_url
        .parse::<HeaderValue>()
        .map_err(|_| Error::Config(format!("Invalid FRONTEND_URL: {}", frontend_url)))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
