//! Attachment item model and its lifecycle states.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle tag of an attachment as sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// Newly picked, not yet saved.
    Reg,
    /// Existing and kept as is.
    Upd,
    /// Existing and marked for removal.
    Del,
}

impl Mode {
    /// Wire representation (`REG`, `UPD`, `DEL`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reg => "REG",
            Self::Upd => "UPD",
            Self::Del => "DEL",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier of an attachment within one registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentKey(String);

impl AttachmentKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Key for a freshly picked file: `new::{name}::{timestamp_ms}`.
    ///
    /// The timestamp keeps repeated picks of a same-named file apart.
    pub fn for_new_file(file_name: &str, timestamp_ms: i64) -> Self {
        Self(format!("new::{file_name}::{timestamp_ms}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttachmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AttachmentKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AttachmentKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Where an attachment sits in its lifecycle.
///
/// Only `New` carries bytes, so a `REG` item without a binary cannot exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentState {
    /// Picked in this session; the bytes go out with the next submit.
    New { binary: Vec<u8> },
    /// Known to the server and kept.
    Kept,
    /// Known to the server and scheduled for deletion. Terminal.
    Removed,
}

impl AttachmentState {
    pub const fn mode(&self) -> Mode {
        match self {
            Self::New { .. } => Mode::Reg,
            Self::Kept => Mode::Upd,
            Self::Removed => Mode::Del,
        }
    }
}

/// One file tracked by the attachment manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentItem {
    key: AttachmentKey,
    state: AttachmentState,
    /// Display file name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type.
    pub content_type: String,
    /// Server-supplied fields echoed back untouched (e.g. `seq`).
    pub extra: Map<String, Value>,
}

impl AttachmentItem {
    /// A freshly picked file pending upload.
    pub fn new_upload(
        key: AttachmentKey,
        name: impl Into<String>,
        content_type: impl Into<String>,
        binary: Vec<u8>,
    ) -> Self {
        Self {
            key,
            size: binary.len() as u64,
            state: AttachmentState::New { binary },
            name: name.into(),
            content_type: content_type.into(),
            extra: Map::new(),
        }
    }

    /// An attachment the server already knows about.
    ///
    /// `removed` seeds the item directly in the terminal `DEL` state.
    pub fn existing(
        key: AttachmentKey,
        name: impl Into<String>,
        size: u64,
        content_type: impl Into<String>,
        extra: Map<String, Value>,
        removed: bool,
    ) -> Self {
        Self {
            key,
            state: if removed {
                AttachmentState::Removed
            } else {
                AttachmentState::Kept
            },
            name: name.into(),
            size,
            content_type: content_type.into(),
            extra,
        }
    }

    #[must_use]
    pub const fn key(&self) -> &AttachmentKey {
        &self.key
    }

    #[must_use]
    pub const fn state(&self) -> &AttachmentState {
        &self.state
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Raw bytes; only new uploads carry them.
    #[must_use]
    pub fn binary(&self) -> Option<&[u8]> {
        match &self.state {
            AttachmentState::New { binary } => Some(binary.as_slice()),
            AttachmentState::Kept | AttachmentState::Removed => None,
        }
    }

    /// Apply a removal request.
    ///
    /// New uploads were never committed and disappear (`None`); existing
    /// items become `DEL`, which is idempotent.
    #[must_use]
    pub fn marked_for_removal(self) -> Option<Self> {
        match self.state {
            AttachmentState::New { .. } => None,
            AttachmentState::Kept | AttachmentState::Removed => Some(Self {
                state: AttachmentState::Removed,
                ..self
            }),
        }
    }
}
