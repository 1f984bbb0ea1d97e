//! Request dispatch module
//!
//! This module routes each incoming request to the handler that owns its
//! protocol: CONNECT requests become raw tunnels, everything else is
//! forwarded as plaintext HTTP.

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{combinators::BoxBody, BodyExt, Empty, Full};
use hyper::body::Incoming;
use hyper::{Method, Request, Response};

use crate::config::ProxyConfig;
use super::{forward, tunnel};

/// Response body type shared by both handling paths
pub type ProxyBody = BoxBody<Bytes, hyper::Error>;

/// Dispatch a request to the tunnel or forwarding path
///
/// Routing is purely on the request method; any error is produced and
/// reported by the handler that was invoked.
pub(super) async fn dispatch(
    req: Request<Incoming>,
    config: Arc<ProxyConfig>,
) -> std::result::Result<Response<ProxyBody>, hyper::Error> {
    if req.method() == Method::CONNECT {
        tunnel::handle_connect(req, config).await
    } else {
        forward::handle_http(req).await
    }
}

/// Empty response body (CONNECT confirmations)
pub(super) fn empty() -> ProxyBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

/// Response body holding the given bytes (error replies)
pub(super) fn full<T: Into<Bytes>>(chunk: T) -> ProxyBody {
    Full::new(chunk.into())
        .map_err(|never| match never {})
        .boxed()
}
