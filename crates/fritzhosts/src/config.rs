//! Connection settings used to build device URLs and the HTTP client.

use std::time::Duration;

/// Default address of the device on the local link.
pub const DEFAULT_ADDRESS: &str = "http://169.254.1.1";
/// Default TR-064 port.
pub const DEFAULT_PORT: u16 = 49000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsConfig {
    /// Scheme and host, e.g. `http://192.168.178.1`.
    pub address: String,
    pub port: u16,
    /// Timeout applied by the HTTP adapter; `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            timeout: None,
        }
    }
}

impl HostsConfig {
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        let address = address.into();
        self.address = if address.contains("://") {
            address
        } else {
            format!("http://{address}")
        };
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Absolute URL for a path reported by the device.
    ///
    /// Absolute URLs are returned unchanged.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.address.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}:{}{path}", self.port)
        } else {
            format!("{base}:{}/{path}", self.port)
        }
    }
}
