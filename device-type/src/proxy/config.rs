use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// TCP socket address to listen for incoming connections.
    ///
    /// Default: `0.0.0.0:8080`
    pub listen_addr: SocketAddr,

    /// Upper bound on handling one `/run` request.
    ///
    /// Default: `60s`
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen_addr: (Ipv4Addr::UNSPECIFIED, 8080).into(),
            request_timeout: Duration::from_secs(60),
        }
    }
}
