//! Plain HTTP forwarding module
//!
//! This module rewrites non-CONNECT requests onto their origin server and
//! streams the response back to the client unmodified.

use http::uri::Authority;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper::header::{HeaderValue, HOST};
use hyper::{Request, Response, StatusCode, Uri};
use hyper_util::rt::TokioIo;
use log::debug;
use tokio::net::TcpStream;

use super::dispatch::{full, ProxyBody};

/// Forward a plain HTTP request to its origin server
///
/// The request is rewritten by the director ([`rewrite_request`]) so that it
/// targets the original host over plaintext HTTP, then sent over a fresh
/// HTTP/1.1 client connection. The response is relayed verbatim; network
/// failures on the way to the origin surface as `502 Bad Gateway`.
pub(super) async fn handle_http(
    mut req: Request<Incoming>,
) -> std::result::Result<Response<ProxyBody>, hyper::Error> {
    let authority = match target_authority(&req) {
        Some(authority) => authority,
        None => {
            debug!("Request has no resolvable host: {}", req.uri());
            let mut resp = Response::new(full("request has no host"));
            *resp.status_mut() = StatusCode::BAD_REQUEST;
            return Ok(resp);
        }
    };

    rewrite_request(&mut req, &authority);

    let addr = (authority.host().to_string(), authority.port_u16().unwrap_or(80));
    let origin_stream = match TcpStream::connect(addr).await {
        Ok(stream) => stream,
        Err(e) => {
            debug!("Failed to dial origin {}: {}", authority, e);
            return Ok(bad_gateway(e.to_string()));
        }
    };

    // Header case is preserved in both directions so the proxy stays
    // transparent to clients and origins that care about it.
    let handshake = http1::Builder::new()
        .preserve_header_case(true)
        .title_case_headers(true)
        .handshake(TokioIo::new(origin_stream))
        .await;
    let (mut sender, conn) = match handshake {
        Ok(parts) => parts,
        Err(e) => {
            debug!("Handshake with origin {} failed: {}", authority, e);
            return Ok(bad_gateway(e.to_string()));
        }
    };

    // Drive the origin connection until the response body completes.
    tokio::spawn(async move {
        if let Err(e) = conn.await {
            debug!("Origin connection closed with error: {}", e);
        }
    });

    match sender.send_request(req).await {
        Ok(resp) => Ok(resp.map(|body| body.boxed())),
        Err(e) => {
            debug!("Forwarding to origin {} failed: {}", authority, e);
            Ok(bad_gateway(e.to_string()))
        }
    }
}

/// Gateway-style error reply for failures on the way to the origin
fn bad_gateway(message: String) -> Response<ProxyBody> {
    let mut resp = Response::new(full(message));
    *resp.status_mut() = StatusCode::BAD_GATEWAY;
    resp
}

/// Resolve the host the request was addressed to
///
/// Absolute-form proxy requests carry the host in the URI; origin-form
/// requests fall back to the `Host` header.
fn target_authority<B>(req: &Request<B>) -> Option<Authority> {
    if let Some(authority) = req.uri().authority() {
        return Some(authority.clone());
    }

    req.headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .and_then(|host| host.parse().ok())
}

/// Director for forwarded requests
///
/// Forces the scheme to plaintext HTTP and the target to the original
/// request's host, keeping path and query. Whatever destination the URI
/// pointed at before, the forwarded request goes to `authority`.
fn rewrite_request<B>(req: &mut Request<B>, authority: &Authority) {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    if let Ok(uri) = Uri::builder()
        .scheme("http")
        .authority(authority.clone())
        .path_and_query(path_and_query)
        .build()
    {
        *req.uri_mut() = uri;
    }

    if let Ok(host) = HeaderValue::from_str(authority.as_str()) {
        req.headers_mut().insert(HOST, host);
    }
}
