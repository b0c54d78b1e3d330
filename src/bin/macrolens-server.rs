// ABOUTME: Server binary for the Macrolens API
// ABOUTME: Loads configuration, builds the shared resources and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

//! # Macrolens API Server Binary

use anyhow::Result;
use clap::Parser;
use macrolens_server::{config::environment::ServerConfig, context::ServerResources, logging, server};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "macrolens-server")]
#[command(about = "Macrolens API - food photo recognition and macro tracking")]
#[command(version)]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Load the reference food table from a JSON file
    #[arg(long)]
    food_table: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(food_table) = args.food_table {
        config.food_table_path = Some(food_table);
    }

    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config)?);
    server::run(resources).await
}
