use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use duet::server::{
    RoomManager, ServerConfig, SignalingService, StunResponder, TurnConfig, app,
};
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "duet")]
#[command(about = "Signaling server pairing one sender with one viewer per room")]
struct Args {
    /// Interface to bind
    #[arg(long, env = "HTTP_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// HTTP and WebSocket port
    #[arg(long, env = "HTTP_PORT", default_value_t = duet::server::DEFAULT_HTTP_PORT)]
    port: u16,

    /// UDP port of the built-in STUN responder (0 disables it)
    #[arg(long, env = "STUN_PORT", default_value_t = duet::server::DEFAULT_STUN_PORT)]
    stun_port: u16,

    /// WebSocket signaling path
    #[arg(long, env = "WS_PATH", default_value = duet::server::DEFAULT_WS_PATH)]
    ws_path: String,

    /// Extra STUN server advertised to clients
    #[arg(long, env = "STUN_URL")]
    stun_url: Option<String>,

    #[arg(long, env = "TURN_URL", requires_all = ["turn_username", "turn_password"])]
    turn_url: Option<String>,

    #[arg(long, env = "TURN_USERNAME")]
    turn_username: Option<String>,

    #[arg(long, env = "TURN_PASSWORD", hide_env_values = true)]
    turn_password: Option<String>,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let turn = match (self.turn_url, self.turn_username, self.turn_password) {
            (Some(url), Some(username), Some(password)) => Some(TurnConfig {
                url,
                username,
                password,
            }),
            _ => None,
        };

        ServerConfig {
            host: self.host,
            http_port: self.port,
            stun_port: self.stun_port,
            ws_path: self.ws_path,
            stun_url: self.stun_url,
            turn,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config();

    if let Some(stun_addr) = config.stun_addr() {
        let responder = StunResponder::bind(stun_addr)
            .await
            .context("Failed to start STUN responder")?;
        tokio::spawn(async move {
            if let Err(e) = responder.run().await {
                error!("STUN responder stopped: {}", e);
            }
        });
    }

    let service = SignalingService::new(RoomManager::new());
    let router = app(service, &config);

    let addr = config.http_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    print_banner(&config);
    info!("Signaling server listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

fn print_banner(config: &ServerConfig) {
    let ip = local_ip();
    let rule = "=".repeat(60);

    println!("\n{}", rule);
    println!("{}", "🚀 Duet signaling server started".green().bold());
    println!("{}", rule);
    println!(
        "📡 Signaling: {}",
        format!("ws://{}:{}{}", ip, config.http_port, config.ws_path()).cyan()
    );
    println!(
        "📊 Status:    {}",
        format!("http://{}:{}/api/status", ip, config.http_port).cyan()
    );
    if let Some(stun) = config.stun_addr() {
        println!(
            "🔧 STUN:      {}",
            format!("udp://{}:{}", ip, stun.port()).cyan()
        );
    }
    println!();
}

/// First non-loopback IPv4 address, found by asking the OS which interface
/// would route to a public address. No packet is sent.
fn local_ip() -> IpAddr {
    UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
        .and_then(|socket| {
            socket.connect((Ipv4Addr::new(8, 8, 8, 8), 80))?;
            socket.local_addr()
        })
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
