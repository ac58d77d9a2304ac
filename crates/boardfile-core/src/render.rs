//! Selection list rendering.

use serde::Serialize;

use crate::config::Messages;
use crate::models::{AttachmentItem, Mode};

/// One entry of the host selection widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Attachment key; what the host reports back when the option is selected.
    pub value: String,
    /// File name plus mode suffix.
    pub label: String,
}

/// Build one option per item, in collection order.
pub fn render_options(items: &[AttachmentItem], messages: &Messages) -> Vec<SelectOption> {
    items
        .iter()
        .map(|item| SelectOption {
            value: item.key().to_string(),
            label: option_label(item, messages),
        })
        .collect()
}

fn option_label(item: &AttachmentItem, messages: &Messages) -> String {
    match item.mode() {
        Mode::Reg => format!("{}{}", item.name, messages.new_suffix),
        Mode::Del => format!("{}{}", item.name, messages.removed_suffix),
        Mode::Upd => item.name.clone(),
    }
}

/// Text for the picker's companion label after `count` files were chosen.
pub fn picker_label(count: usize, messages: &Messages) -> String {
    if count == 0 {
        messages.picker_placeholder.to_string()
    } else {
        messages.picker_count(count)
    }
}
