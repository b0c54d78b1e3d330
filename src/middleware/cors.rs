// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Provides Cross-Origin Resource Sharing setup for the web and mobile clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use crate::config::environment::CorsConfig;
use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS for the API
///
/// An explicit origin list allows credentials. `*`, an empty list, or a list
/// with no parseable origin allows any origin without credentials. Credentials
/// are never combined with a wildcard origin (`tower-http` panics on that).
///
/// ```bash
/// # Web dev server and Expo clients
/// export CORS_ORIGINS="http://localhost:3000,http://localhost:8081,exp://localhost:8081"
/// ```
pub fn setup_cors(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = if cors.allowed_origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        cors.allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect()
    };

    let layer = CorsLayer::new()
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-request-id"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ]);

    if origins.is_empty() {
        layer.allow_origin(AllowOrigin::any())
    } else {
        layer
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
    }
}
