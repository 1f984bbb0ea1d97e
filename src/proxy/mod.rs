//! Proxy service module
//!
//! This module implements the core functionality of the proxy service:
//! accepting client connections, dispatching requests by method, tunneling
//! CONNECT traffic as opaque bytes, and forwarding plain HTTP requests.

pub mod server;
mod dispatch;
mod tunnel;
mod forward;

pub use server::ProxyServer;
pub use dispatch::ProxyBody;
