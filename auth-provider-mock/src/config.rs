use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Mock service configuration, read from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bind address (MOCK_AUTH_BIND, default 127.0.0.1)
    pub bind: IpAddr,
    /// Service port (MOCK_AUTH_PORT, default 3001)
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind: lookup("MOCK_AUTH_BIND")
                .and_then(|b| b.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            port: lookup("MOCK_AUTH_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
