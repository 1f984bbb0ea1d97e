//! Forward Proxy Command Line Tool
//!
//! This binary is the command-line interface for Forward Proxy.

use clap::Parser;
use log::{info, warn};

// Import our library
use forward_proxy::{ProxyServer, VERSION, APP_NAME};
use forward_proxy::common::{Result, init_logger};
use forward_proxy::config::ProxyConfig;

// Import for file operations
use std::path::Path;
use std::sync::Arc;

/// Forward Proxy: HTTP forward proxy with CONNECT tunneling
#[derive(Parser, Debug)]
#[clap(author, version = VERSION, about, long_about = None)]
struct Args {
    /// Listen address
    #[clap(short, long, default_value = "0.0.0.0:8006")]
    listen: String,

    /// Log level
    #[clap(long, default_value = "info")]
    log_level: String,

    /// Load configuration from environment variables
    #[clap(long)]
    from_env: bool,

    /// Load configuration from a file
    #[clap(long)]
    config_file: Option<String>,

    /// Environment (development, testing, production)
    #[clap(long, default_value = "production")]
    environment: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    init_logger(&args.log_level);

    info!("Starting {} v{}", APP_NAME, VERSION);

    // Create default configuration
    let mut config = ProxyConfig::default();

    // Load environment-specific configuration if it exists
    let env_config_path = format!("config.{}.json", args.environment);
    if Path::new(&env_config_path).exists() {
        info!("Loading environment-specific configuration from {}", env_config_path);
        config = config.merge(ProxyConfig::from_file(&env_config_path)?);
    }

    // Load from configuration file if specified
    if let Some(config_file) = args.config_file.clone() {
        if Path::new(&config_file).exists() {
            info!("Loading configuration from file: {}", config_file);
            config = config.merge(ProxyConfig::from_file(&config_file)?);
        } else {
            warn!("Configuration file not found: {}", config_file);
        }
    }

    // Load from environment variables if specified
    if args.from_env {
        info!("Loading configuration from environment variables");
        config = config.merge(ProxyConfig::from_env()?);
    } else {
        // Load from command line arguments
        info!("Loading configuration from command line arguments");
        config = config.merge(ProxyConfig::from_args(&args.listen, &args.log_level)?);
    }

    // Validate the final configuration
    config.validate()?;

    info!("Configuration loaded successfully");
    info!("Listen address: {}", config.listen);

    // Bind and start the proxy
    let listen_addr = config.listen;
    let server = ProxyServer::bind(listen_addr, Arc::new(config)).await?;

    info!("Proxy service ready, press Ctrl+C to stop");

    // Run proxy service
    server.run().await?;

    Ok(())
}
