//! Data models for boardfile

mod attachment;
mod existing;
mod raw_file;

pub use attachment::{AttachmentItem, AttachmentKey, AttachmentState, Mode};
pub use existing::{ExistingAttachment, ExistingAttachments};
pub use raw_file::RawFile;
