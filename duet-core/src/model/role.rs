use serde::{Deserialize, Serialize};
use std::fmt;

/// The position a connection occupies inside a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Sender,
    Viewer,
}

impl Role {
    pub fn opposite(self) -> Self {
        match self {
            Role::Sender => Role::Viewer,
            Role::Viewer => Role::Sender,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Sender => "sender",
            Role::Viewer => "viewer",
        }
    }

    /// Reason reported to a connection that asked for an already occupied slot.
    pub fn conflict_reason(self) -> String {
        format!("{}-already-exists", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
