use crate::config::{default_bind_address, default_poll_timeout_ms, default_port};

use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use serde::{Deserialize, Serialize};

/// UDP control channel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Local address the control socket binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// Local UDP port the robot controller sends status packets to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on each wait for a datagram, in milliseconds.
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
}

impl ControlConfig {
    /// Socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Datagram wait per loop iteration.
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            poll_timeout_ms: default_poll_timeout_ms(),
        }
    }
}
