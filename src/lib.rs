//! Forward Proxy: HTTP forward proxy with CONNECT tunneling
//!
//! This library implements an HTTP forward proxy. CONNECT requests become
//! raw bidirectional byte tunnels to the requested destination; every other
//! request is rewritten onto its origin server as plaintext HTTP and the
//! response is streamed back unmodified.
//!
//! # Main Features
//!
//! - CONNECT tunneling with connection takeover and detached byte relays
//! - Transparent plaintext forwarding with a host/scheme rewriting director
//! - HTTP/1.1 only; the HTTP/2 upgrade path is disabled
//!
//! # Example
//!
//! ```no_run
//! use forward_proxy::{ProxyServer, Result, parse_socket_addr};
//! use forward_proxy::config::ProxyConfig;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Parse the listen address
//!     let listen_addr = parse_socket_addr("0.0.0.0:8006")?;
//!
//!     // Create default config and wrap in Arc
//!     let config = Arc::new(ProxyConfig::default());
//!
//!     // Bind and run the proxy
//!     let server = ProxyServer::bind(listen_addr, config).await?;
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

// Public modules
pub mod common;
pub mod config;
pub mod proxy;

// Re-export commonly used structures and functions for convenience
pub use proxy::ProxyServer;
pub use common::{ProxyError, Result, parse_socket_addr};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
