//! Stateless STUN binding responder.
//!
//! Answers every Binding Request with the reflexive transport address the
//! request came from, which is all a browser needs to gather a server
//! reflexive candidate. No allocations, no credentials, no session state.

use crate::error::ServerError;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};
use webrtc::stun::fingerprint::FINGERPRINT;
use webrtc::stun::message::{BINDING_REQUEST, BINDING_SUCCESS, Message, Setter, is_message};
use webrtc::stun::xoraddr::XorMappedAddress;

const MAX_DATAGRAM: usize = 1500;

pub struct StunResponder {
    socket: UdpSocket,
}

impl StunResponder {
    pub async fn bind(addr: SocketAddr) -> Result<Self, ServerError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.socket.local_addr()?)
    }

    /// Serves binding requests for as long as the task runs. Receive and send
    /// failures concern a single datagram and are logged.
    pub async fn run(self) -> Result<(), ServerError> {
        info!("STUN server listening on udp://{}", self.local_addr()?);
        let mut buf = vec![0u8; MAX_DATAGRAM];

        loop {
            let (len, source) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(e) => {
                    warn!("STUN receive error: {}", e);
                    continue;
                }
            };

            let response = match binding_response(&buf[..len], source) {
                Ok(Some(response)) => response,
                Ok(None) => continue,
                Err(e) => {
                    debug!("Ignoring datagram from {}: {}", source, e);
                    continue;
                }
            };

            debug!("STUN binding request from {}", source);
            if let Err(e) = self.socket.send_to(&response, source).await {
                error!("STUN send error to {}: {}", source, e);
            }
        }
    }
}

/// Encodes the Binding Success answer for `datagram`, or `None` when it is
/// not a STUN Binding Request.
pub fn binding_response(datagram: &[u8], source: SocketAddr) -> Result<Option<Vec<u8>>, ServerError> {
    if !is_message(datagram) {
        return Ok(None);
    }

    let mut request = Message::new();
    request.unmarshal_binary(datagram)?;
    if request.typ != BINDING_REQUEST {
        return Ok(None);
    }

    let mut response = Message::new();
    let setters: Vec<Box<dyn Setter>> = vec![
        Box::new(request.transaction_id),
        Box::new(BINDING_SUCCESS),
        Box::new(XorMappedAddress {
            ip: source.ip(),
            port: source.port(),
        }),
        Box::new(FINGERPRINT),
    ];
    response.build(&setters)?;

    Ok(Some(response.raw))
}
