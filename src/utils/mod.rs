// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains shared HTTP client construction

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

/// HTTP client configuration and helpers
pub mod http_client;
