//! Submit payload assembly.
//!
//! The registry snapshot is split into uploads (`REG`) and removals (`DEL`);
//! kept items (`UPD`) need no action and are left out. Parts are emitted in
//! wire order: form fields, `baseFileInfo`, the file parts, `fileInfo`,
//! `removeFiles`.

mod response;

use serde::Serialize;
use serde_json::{Map, Value};

pub use response::{interpret_response, transport_failure, ErrorPayload, SubmitOutcome};

use crate::config::ManagerConfig;
use crate::models::{AttachmentItem, AttachmentState, Mode};
use crate::Result;

pub const BASE_FILE_INFO_FIELD: &str = "baseFileInfo";
pub const FILE_INFO_FIELD: &str = "fileInfo";
pub const REMOVE_FILES_FIELD: &str = "removeFiles";

/// Owning entity descriptor sent as `baseFileInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseFileInfo {
    pub id: String,
}

/// Metadata of one uploaded file, without key, mode or bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub content_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keys of attachments the server should delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoveFiles {
    pub key: Vec<String>,
}

/// One binary part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A multipart part in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadPart<'a> {
    Text { name: &'a str, value: String },
    File { name: &'a str, file: &'a FilePart },
}

/// Everything a submit sends, captured at trigger time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPayload {
    pub form_fields: Vec<(String, String)>,
    pub base_file_info: BaseFileInfo,
    pub file_field: String,
    pub files: Vec<FilePart>,
    pub file_info: Vec<FileInfo>,
    pub remove_files: RemoveFiles,
}

impl SubmitPayload {
    /// Ordered multipart parts, with the structured parts JSON-encoded.
    pub fn parts(&self) -> Result<Vec<PayloadPart<'_>>> {
        let mut parts = Vec::with_capacity(self.form_fields.len() + self.files.len() + 3);
        for (name, value) in &self.form_fields {
            parts.push(PayloadPart::Text {
                name,
                value: value.clone(),
            });
        }
        parts.push(PayloadPart::Text {
            name: BASE_FILE_INFO_FIELD,
            value: serde_json::to_string(&self.base_file_info)?,
        });
        for file in &self.files {
            parts.push(PayloadPart::File {
                name: &self.file_field,
                file,
            });
        }
        parts.push(PayloadPart::Text {
            name: FILE_INFO_FIELD,
            value: serde_json::to_string(&self.file_info)?,
        });
        parts.push(PayloadPart::Text {
            name: REMOVE_FILES_FIELD,
            value: serde_json::to_string(&self.remove_files)?,
        });
        Ok(parts)
    }

    /// True when the submit carries no attachment changes.
    #[must_use]
    pub fn has_no_attachment_changes(&self) -> bool {
        self.files.is_empty() && self.remove_files.key.is_empty()
    }
}

/// Build the payload for the current snapshot.
pub fn build_payload(
    items: &[AttachmentItem],
    form_fields: Vec<(String, String)>,
    config: &ManagerConfig,
) -> SubmitPayload {
    let mut files = Vec::new();
    let mut file_info = Vec::new();
    let mut remove_files = RemoveFiles::default();

    for item in items {
        match item.state() {
            AttachmentState::New { binary } => {
                files.push(FilePart {
                    file_name: item.name.clone(),
                    content_type: item.content_type.clone(),
                    bytes: binary.clone(),
                });
                file_info.push(FileInfo {
                    name: item.name.clone(),
                    size: item.size,
                    content_type: item.content_type.clone(),
                    extra: item.extra.clone(),
                });
            }
            AttachmentState::Removed => remove_files.key.push(item.key().to_string()),
            AttachmentState::Kept => {}
        }
    }

    tracing::debug!(
        "Built submit payload: {} uploads, {} removals, {} kept",
        files.len(),
        remove_files.key.len(),
        items.iter().filter(|item| item.mode() == Mode::Upd).count()
    );

    SubmitPayload {
        form_fields,
        base_file_info: BaseFileInfo {
            id: config.entity_id.clone(),
        },
        file_field: config.file_field.clone(),
        files,
        file_info,
        remove_files,
    }
}
