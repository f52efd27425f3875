use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid STUN message: {0}")]
    Stun(#[from] webrtc::stun::Error),
}

/// Failure at the send boundary of a single connection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection is closed")]
    Closed,
}
