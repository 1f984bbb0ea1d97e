//! CONNECT tunnel module
//!
//! This module establishes raw byte tunnels for CONNECT requests and relays
//! traffic in both directions until either side closes. Tunneled bytes are
//! opaque; they are never parsed or inspected.

use std::sync::Arc;

use hyper::body::Incoming;
use hyper::upgrade::OnUpgrade;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use log::{debug, error};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::common::authority_of;
use crate::config::ProxyConfig;
use super::dispatch::{empty, full, ProxyBody};

/// Handle a CONNECT request
///
/// Dials the requested destination, confirms with `200 OK`, takes over the
/// client's raw connection once hyper has flushed the response, and leaves
/// two detached relay tasks running for the life of the tunnel.
///
/// # Parameters
///
/// * `req` - The CONNECT request; its URI carries the `host:port` target
/// * `config` - Proxy configuration
///
/// # Returns
///
/// Returns the HTTP response confirming or refusing the tunnel.
pub(super) async fn handle_connect(
    mut req: Request<Incoming>,
    config: Arc<ProxyConfig>,
) -> std::result::Result<Response<ProxyBody>, hyper::Error> {
    let addr = match authority_of(req.uri()) {
        Some(addr) => addr,
        None => {
            debug!("CONNECT target is not in authority form: {}", req.uri());
            let mut resp = Response::new(full("CONNECT target must be host:port"));
            *resp.status_mut() = StatusCode::BAD_REQUEST;
            return Ok(resp);
        }
    };

    // Dial before confirming anything to the client. On failure nothing has
    // been taken over yet, so a plain HTTP error can still be written.
    let dest_stream = match TcpStream::connect(&addr).await {
        Ok(stream) => stream,
        Err(e) => {
            debug!("Failed to dial {}: {}", addr, e);
            let mut resp = Response::new(full(e.to_string()));
            *resp.status_mut() = StatusCode::SERVICE_UNAVAILABLE;
            return Ok(resp);
        }
    };

    // The serving layer must support handing the raw client connection over.
    // A missing takeover capability is a misconfigured environment, not a
    // transient fault.
    let on_upgrade = match req.extensions_mut().remove::<OnUpgrade>() {
        Some(on_upgrade) => on_upgrade,
        None => {
            error!("Connection takeover not supported for CONNECT to {}", addr);
            let mut resp = Response::new(full("connection takeover not supported"));
            *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            return Ok(resp);
        }
    };

    let buffer_size = config.buffer_size;
    tokio::spawn(async move {
        // The takeover completes only after the 200 response below has been
        // written, so it must be awaited from a detached task.
        match on_upgrade.await {
            Ok(upgraded) => {
                debug!("Tunnel established to {}", addr);

                let (client_reader, client_writer) = tokio::io::split(TokioIo::new(upgraded));
                let (dest_reader, dest_writer) = tokio::io::split(dest_stream);

                // One relay per direction; neither is awaited and neither
                // coordinates with the other beyond tolerating the far
                // side's shutdown.
                tokio::spawn(relay(client_reader, dest_writer, buffer_size));
                tokio::spawn(relay(dest_reader, client_writer, buffer_size));
            }
            Err(e) => error!("Connection takeover failed for {}: {}", addr, e),
        }
    });

    // Empty 200; hyper performs the upgrade once this response is flushed.
    Ok(Response::new(empty()))
}

/// Relay bytes from `reader` to `writer` until end-of-stream or error
///
/// When the read side finishes, the write side is shut down so the far peer
/// observes EOF. Shutting down an already-closed stream is a no-op, which is
/// what lets the two relays of a tunnel finish in either order.
async fn relay<R, W>(mut reader: R, mut writer: W, buffer_size: usize)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut total_bytes = 0;

    loop {
        match reader.read(&mut buffer).await {
            Ok(0) => break, // Connection closed
            Ok(n) => {
                total_bytes += n;
                if writer.write_all(&buffer[..n]).await.is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    }

    let _ = writer.shutdown().await;
    debug!("Relay closed after {} bytes", total_bytes);
}
