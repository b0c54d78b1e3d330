// ABOUTME: Shared HTTP client construction with connection pooling and timeout configuration
// ABOUTME: Clients are built once at startup and injected into the external collaborators

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Connect timeout for every outbound client
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Request timeout for the managed backend
pub const BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Create a new HTTP client with custom timeout settings
///
/// Falls back to a default client if the builder fails.
#[must_use]
pub fn create_client_with_timeout(timeout: Duration, connect_timeout: Duration) -> Client {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(connect_timeout.min(timeout))
        .user_agent(concat!("macrolens-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Client for the managed backend (auth service and table store)
#[must_use]
pub fn backend_client() -> Client {
    create_client_with_timeout(BACKEND_TIMEOUT, CONNECT_TIMEOUT)
}

/// Client for the food classifier
///
/// The classifier additionally bounds each request with its own timeout.
#[must_use]
pub fn classifier_client(timeout: Duration) -> Client {
    create_client_with_timeout(timeout, CONNECT_TIMEOUT)
}
