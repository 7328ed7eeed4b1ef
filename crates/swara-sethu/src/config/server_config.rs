use crate::config::{default_bind_address, default_port};

use serde::{Deserialize, Serialize};

/// Proxy server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the proxy listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address the proxy binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
        }
    }
}

impl ServerConfig {
    /// `host:port` to bind.
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
