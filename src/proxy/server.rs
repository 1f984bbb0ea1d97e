//! Proxy server module
//!
//! This module implements the listening side of the proxy: it accepts client
//! connections and serves each one with the HTTP/1.1 dispatcher. The HTTP/2
//! upgrade path is deliberately not wired up; every connection speaks
//! textual HTTP/1.1 framing.

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use log::{debug, error, info};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;

use crate::common::{ProxyError, Result};
use crate::config::ProxyConfig;
use super::dispatch::dispatch;

/// Proxy server structure
///
/// Holds the bound listener and the shared configuration. Binding is
/// separate from serving so callers can learn the local address before
/// traffic starts (the tests bind to an ephemeral port).
pub struct ProxyServer {
    /// Bound TCP listener
    listener: TcpListener,
    /// Proxy configuration (wrapped in Arc for efficient sharing)
    config: Arc<ProxyConfig>,
}

impl ProxyServer {
    /// Bind the proxy server to the given listen address
    ///
    /// # Parameters
    ///
    /// * `listen_addr` - Listen address
    /// * `config` - Proxy configuration
    ///
    /// # Returns
    ///
    /// Returns the bound server, or an error if the address cannot be bound.
    pub async fn bind(listen_addr: SocketAddr, config: Arc<ProxyConfig>) -> Result<Self> {
        let listener = TcpListener::bind(listen_addr).await
            .map_err(ProxyError::Io)?;

        Ok(Self { listener, config })
    }

    /// The address the server is actually listening on
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr().map_err(ProxyError::Io)
    }

    /// Run the proxy service
    ///
    /// Accepts connections until a shutdown signal (Ctrl+C) arrives, then
    /// drains the in-flight request tasks. Established tunnels run detached
    /// and are torn down by their peers, not by shutdown.
    ///
    /// # Returns
    ///
    /// Returns an error if one occurs while accepting connections.
    pub async fn run(self) -> Result<()> {
        let local_addr = self.local_addr()?;
        info!("Proxy service started, listening on {}", local_addr);

        // Create a JoinSet to manage connection tasks efficiently
        let mut tasks = JoinSet::new();

        loop {
            // Check for completed tasks and log any errors
            while let Some(result) = tasks.try_join_next() {
                if let Err(e) = result {
                    error!("Task error: {}", e);
                }
            }

            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((client_stream, client_addr)) => {
                            debug!("Accepted connection from {}", client_addr);

                            let config = Arc::clone(&self.config);
                            tasks.spawn(serve_client(client_stream, config));
                        }
                        Err(e) => {
                            error!("Error accepting connection: {}", e);
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        info!("Waiting for in-flight requests to complete...");
        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                error!("Task error during shutdown: {}", e);
            }
        }

        info!("Proxy service shutdown complete");
        Ok(())
    }
}

/// Serve one client connection with the HTTP/1.1 dispatcher
///
/// Upgrade support must be enabled here or CONNECT takeover cannot work.
async fn serve_client(client_stream: TcpStream, config: Arc<ProxyConfig>) {
    let io = TokioIo::new(client_stream);

    let served = http1::Builder::new()
        .preserve_header_case(true)
        .title_case_headers(true)
        .serve_connection(io, service_fn(move |req| dispatch(req, Arc::clone(&config))))
        .with_upgrades()
        .await;

    if let Err(e) = served {
        // Clients dropping mid-request land here; not a server fault
        debug!("Failed to serve connection: {}", e);
    }
}
