use crate::signaling::IceConfigProvider;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_STUN_PORT: u16 = 3478;
pub const DEFAULT_WS_PATH: &str = "/ws";

/// TURN relay handed to browsers together with its credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface the HTTP server and the STUN responder bind to
    pub host: IpAddr,
    /// HTTP (and WebSocket) port
    pub http_port: u16,
    /// UDP port of the built-in STUN responder, 0 disables it
    pub stun_port: u16,
    /// WebSocket endpoint path
    pub ws_path: String,
    /// Additional STUN server advertised to clients
    pub stun_url: Option<String>,
    pub turn: Option<TurnConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: DEFAULT_HTTP_PORT,
            stun_port: DEFAULT_STUN_PORT,
            ws_path: DEFAULT_WS_PATH.to_string(),
            stun_url: None,
            turn: None,
        }
    }
}

impl ServerConfig {
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.http_port)
    }

    pub fn stun_addr(&self) -> Option<SocketAddr> {
        (self.stun_port != 0).then(|| SocketAddr::new(self.host, self.stun_port))
    }

    /// The WebSocket path with a leading slash, as the router requires.
    pub fn ws_path(&self) -> String {
        if self.ws_path.starts_with('/') {
            self.ws_path.clone()
        } else {
            format!("/{}", self.ws_path)
        }
    }

    pub fn ice_config(&self) -> IceConfigProvider {
        IceConfigProvider::new(
            self.stun_url.clone(),
            self.stun_addr().map(|addr| addr.port()),
            self.turn.clone(),
        )
    }
}
