//! Network utility functions
//!
//! This module provides utility functions for network operations.

use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use http::Uri;

use super::error::{ProxyError, Result};

/// Parse a socket address
///
/// # Arguments
///
/// * `addr` - The address string to parse
///
/// # Returns
///
/// The parsed `SocketAddr`
pub fn parse_socket_addr(addr: &str) -> Result<SocketAddr> {
    // Try direct parsing first
    if let Ok(socket_addr) = SocketAddr::from_str(addr) {
        return Ok(socket_addr);
    }

    // Try using ToSocketAddrs trait
    match addr.to_socket_addrs() {
        Ok(mut addrs) => {
            if let Some(addr) = addrs.next() {
                Ok(addr)
            } else {
                Err(ProxyError::Config(format!("Failed to parse address: {}", addr)))
            }
        }
        Err(e) => Err(ProxyError::Config(format!("Failed to parse address {}: {}", addr, e))),
    }
}

/// Extract the authority (`host:port`) from a request URI
///
/// CONNECT requests carry their target in authority form rather than as a
/// full URL, so this is the tunnel destination as the client wrote it.
pub fn authority_of(uri: &Uri) -> Option<String> {
    uri.authority().map(|auth| auth.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_socket_addr() {
        // Test valid address
        let addr = parse_socket_addr("127.0.0.1:8080");
        assert!(addr.is_ok(), "Should be able to parse a valid address");

        if let Ok(socket_addr) = addr {
            assert_eq!(socket_addr.port(), 8080);
        }

        // Test invalid address
        let addr = parse_socket_addr("invalid-address");
        assert!(addr.is_err(), "Should fail to parse an invalid address");
    }

    #[test]
    fn test_authority_of() {
        let uri: Uri = "example.com:443".parse().unwrap();
        assert_eq!(authority_of(&uri), Some("example.com:443".to_string()));

        let uri: Uri = "http://example.com/path".parse().unwrap();
        assert_eq!(authority_of(&uri), Some("example.com".to_string()));

        let uri: Uri = "/path-only".parse().unwrap();
        assert_eq!(authority_of(&uri), None);
    }
}
