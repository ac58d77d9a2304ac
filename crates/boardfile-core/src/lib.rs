//! boardfile-core - Core library for boardfile
//!
//! This crate contains the attachment registry, the selection/submit
//! controller, and the multipart transport shared by every boardfile host
//! (CLI today, embedded form widgets later).

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod models;
pub mod registry;
pub mod render;
pub mod submit;
pub mod transport;
pub mod util;

pub use config::{Locale, ManagerConfig, Messages};
pub use controller::{AttachmentManager, AttachmentManagerBuilder, PendingSubmit};
pub use error::{Error, Result};
pub use models::{AttachmentItem, AttachmentKey, ExistingAttachments, Mode, RawFile};
pub use registry::{AttachmentRegistry, RegistryListener};
pub use submit::{SubmitOutcome, SubmitPayload};
pub use transport::{HttpTransport, Transport, TransportResponse};
