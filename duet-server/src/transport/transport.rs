use crate::error::TransportError;

/// Close code for an orderly shutdown; clients do not reconnect after it.
pub const NORMAL_CLOSURE: u16 = 1000;

/// What the coordinator needs from one physical connection.
///
/// Implementations must answer `is_open` from the live connection state and
/// must never block in `send_text` or `close`.
pub trait Transport: Send + Sync {
    fn is_open(&self) -> bool;

    fn send_text(&self, text: String) -> Result<(), TransportError>;

    fn close(&self, code: u16, reason: &str) -> Result<(), TransportError>;
}
