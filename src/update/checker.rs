//! Remote version probe.
//!
//! Fetches the plaintext version marker and the replacement payload over
//! HTTP with bounded timeouts. These are blocking calls; [`super`] runs
//! them on a worker thread so the host tick loop is never blocked.

use crate::error::{AutosaveError, Result};
use std::time::Duration;

/// Connect timeout for both endpoints.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Read timeout for both endpoints.
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetch the remote version marker, trimmed of surrounding whitespace.
///
/// # Errors
///
/// Returns [`AutosaveError::Network`] on timeout, connection failure, or
/// a non-success HTTP status.
pub fn fetch_latest_version(url: &str) -> Result<String> {
    fetch_text(url).map(|body| body.trim().to_owned())
}

/// Fetch the full replacement payload as plaintext.
///
/// # Errors
///
/// Returns [`AutosaveError::Network`] on timeout, connection failure, or
/// a non-success HTTP status.
pub fn fetch_payload(url: &str) -> Result<String> {
    fetch_text(url)
}

fn fetch_text(url: &str) -> Result<String> {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(CONNECT_TIMEOUT)
        .timeout_read(READ_TIMEOUT)
        .build();

    let resp = agent
        .get(url)
        .set("User-Agent", concat!("autosave/", env!("CARGO_PKG_VERSION")))
        .call()
        .map_err(|e| AutosaveError::Network(format!("GET {url} failed: {e}")))?;

    resp.into_string()
        .map_err(|e| AutosaveError::Network(format!("cannot read response body from {url}: {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn version_marker_is_trimmed() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/version.txt")
            .with_status(200)
            .with_body("1.1.0\n")
            .create();

        let version = fetch_latest_version(&format!("{}/version.txt", server.url())).unwrap();

        mock.assert();
        assert_eq!(version, "1.1.0");
    }

    #[test]
    fn payload_is_returned_verbatim() {
        let mut server = mockito::Server::new();
        let body = "fn main() {}\n";
        let mock = server
            .mock("GET", "/payload")
            .with_status(200)
            .with_body(body)
            .create();

        let payload = fetch_payload(&format!("{}/payload", server.url())).unwrap();

        mock.assert();
        assert_eq!(payload, body);
    }

    #[test]
    fn non_success_status_is_a_network_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/version.txt")
            .with_status(404)
            .create();

        let result = fetch_latest_version(&format!("{}/version.txt", server.url()));

        mock.assert();
        assert!(matches!(result, Err(AutosaveError::Network(_))));
    }

    #[test]
    fn unreachable_host_is_a_network_error() {
        // Port 1 on localhost refuses the connection.
        let result = fetch_latest_version("http://127.0.0.1:1/version.txt");
        assert!(matches!(result, Err(AutosaveError::Network(_))));
    }
}
