// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment driven server, CORS, classifier and backend configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors
//! Configuration module for the Macrolens server
//!
//! All settings come from environment variables, with command line overrides
//! applied by the binary. See [`environment::ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;

pub use environment::{
    BackendConfig, ClassifierConfig, ClassifierTransport, CorsConfig, Environment, ServerConfig,
};
