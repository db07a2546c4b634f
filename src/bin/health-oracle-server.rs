// ABOUTME: Server binary for the Health Oracle prediction API
// ABOUTME: Loads configuration, opens the database, and serves the REST endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Health Oracle

//! # Health Oracle Server Binary
//!
//! Starts the HTTP API for daily health predictions, goal notifications,
//! and health data reports.

use anyhow::Result;
use clap::Parser;
use health_oracle::{
    config::environment::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    resources::ServerResources,
    server,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "health-oracle-server")]
#[command(about = "Health Oracle - daily health predictions, goals, and trends")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. `sqlite:./data/health_oracle.db`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database = DatabaseUrl::parse_url(database_url)?;
    }

    info!("Starting Health Oracle");
    info!("{}", config.summary());

    let database = Database::new(&config.database.to_connection_string()).await?;
    info!("Database initialized: {}", config.database);

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, config));

    display_available_endpoints(port);

    if let Err(e) = server::run(resources, port).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Log the available API endpoints
fn display_available_endpoints(port: u16) {
    let base = format!("http://localhost:{port}");
    info!("=== Available API Endpoints ===");
    info!("  GET  {base}/health");
    info!("  GET  {base}/ready");
    info!("  POST {base}/api/predictions/self");
    info!("  POST {base}/api/predictions/other");
    info!("  GET  {base}/api/predictions/history");
    info!("  GET  {base}/api/predictions/notifications");
    info!("  PUT  {base}/api/predictions/notifications/:id/read");
    info!("  POST {base}/api/health/daily");
    info!("  GET  {base}/api/health/averages?days=7");
    info!("  GET  {base}/api/health/trends?days=30");
    info!("  POST {base}/api/health/medicine");
    info!("  GET  {base}/api/health/medicine");
    info!("  PUT  {base}/api/health/medicine/:id/taken");
}
