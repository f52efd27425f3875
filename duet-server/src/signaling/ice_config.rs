use crate::config::TurnConfig;
use duet_core::IceServerConfig;

/// Builds the `iceServers` list a client fetches before negotiating.
#[derive(Debug, Clone, Default)]
pub struct IceConfigProvider {
    stun_url: Option<String>,
    stun_port: Option<u16>,
    turn: Option<TurnConfig>,
}

impl IceConfigProvider {
    pub fn new(stun_url: Option<String>, stun_port: Option<u16>, turn: Option<TurnConfig>) -> Self {
        Self {
            stun_url,
            stun_port,
            turn,
        }
    }

    /// `host` is the `Host` the client used to reach us; the built-in STUN
    /// responder is advertised under that name.
    pub fn ice_servers(&self, host: Option<&str>) -> Vec<IceServerConfig> {
        let mut servers = Vec::new();

        if let Some(url) = &self.stun_url {
            servers.push(IceServerConfig::new(url.clone()));
        }

        if let (Some(port), Some(hostname)) = (self.stun_port, host.and_then(hostname)) {
            servers.push(IceServerConfig::new(format!("stun:{hostname}:{port}")));
        }

        if let Some(turn) = &self.turn {
            servers.push(IceServerConfig::with_credentials(
                turn.url.clone(),
                turn.username.clone(),
                turn.password.clone(),
            ));
        }

        servers
    }
}

/// Strips the port from a `Host` header value, keeping IPv6 brackets.
fn hostname(host: &str) -> Option<&str> {
    let host = host.trim();
    let name = if host.starts_with('[') {
        host.find(']').map(|end| &host[..=end])?
    } else {
        host.split(':').next().unwrap_or_default()
    };
    (!name.is_empty()).then_some(name)
}
