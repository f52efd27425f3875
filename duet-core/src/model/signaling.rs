use crate::model::role::Role;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the `iceServers` list handed to browsers before negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }

    pub fn with_credentials(
        url: impl Into<String>,
        username: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            urls: vec![url.into()],
            username: Some(username.into()),
            credential: Some(credential.into()),
        }
    }
}

/// Messages exchanged over the signaling socket.
///
/// Every frame is a JSON object whose `type` field selects the variant.
/// `sdp` and `candidate` payloads are opaque to the server and are relayed
/// exactly as the browser produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SignalMessage {
    // Client -> server
    Join { role: Role, room: RoomId },
    Offer { sdp: Value },
    Answer { sdp: Value },
    IceCandidate { candidate: Value },

    // Server -> client
    Joined { role: Role, room: RoomId },
    ViewerReady,
    SenderLeft,
    ViewerLeft,
    Error { reason: String },
}

impl SignalMessage {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn joined(role: Role, room: RoomId) -> Self {
        Self::Joined { role, room }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error {
            reason: reason.into(),
        }
    }

    /// Notice sent to the remaining peer when the occupant of `role` departs.
    pub fn left(role: Role) -> Self {
        match role {
            Role::Sender => Self::SenderLeft,
            Role::Viewer => Self::ViewerLeft,
        }
    }

    /// Wire name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::IceCandidate { .. } => "ice-candidate",
            Self::Joined { .. } => "joined",
            Self::ViewerReady => "viewer-ready",
            Self::SenderLeft => "sender-left",
            Self::ViewerLeft => "viewer-left",
            Self::Error { .. } => "error",
        }
    }
}
