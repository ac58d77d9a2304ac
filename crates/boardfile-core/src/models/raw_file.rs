//! Files as handed over by a host file picker.

/// A file chosen in the host picker, before it enters the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    /// Host-assigned key; when absent one is synthesized from name and time.
    pub key: Option<String>,
    /// File name as reported by the picker.
    pub name: String,
    /// Reported MIME type, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            key: None,
            name: name.into(),
            content_type: None,
            bytes,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
