//! Capabilities a host page provides to the attachment manager.
//!
//! The manager never reaches for ambient globals: every element it reads
//! from or writes to is one of these trait objects, handed over at build
//! time.

use crate::models::{AttachmentKey, RawFile};
use crate::render::SelectOption;

/// The file input.
pub trait FilePicker {
    /// Ask the host to open its chooser.
    fn open(&mut self) {}

    /// Files chosen in the picker right now.
    fn chosen_files(&mut self) -> Vec<RawFile>;

    /// Reset the picker so the same file can be chosen again.
    fn clear(&mut self);

    /// Update the companion label, when the host has one.
    fn set_label(&mut self, _text: &str) {}
}

/// The multi-option selection list mirroring the registry.
pub trait SelectionView {
    /// Replace all options.
    fn render(&mut self, options: &[SelectOption]);

    /// Values of the currently selected options.
    fn selected_keys(&self) -> Vec<AttachmentKey>;
}

/// The surrounding form.
pub trait FormSource {
    /// Native form fields, in document order.
    fn fields(&self) -> Vec<(String, String)>;
}

impl FormSource for Vec<(String, String)> {
    fn fields(&self) -> Vec<(String, String)> {
        self.clone()
    }
}

/// Where submit outcomes surface.
pub trait Presenter {
    /// Leave the page for `url`.
    fn navigate(&mut self, url: &str);

    /// Show a blocking message.
    fn alert(&mut self, message: &str);
}

/// Presenter that only logs; used when the host supplies none.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn navigate(&mut self, url: &str) {
        tracing::info!("Submit succeeded; redirect to {}", url);
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!("Submit failed: {}", message);
    }
}
