//! Terminal stand-ins for the host page elements.

use std::cell::RefCell;
use std::rc::Rc;

use boardfile_core::host::{FilePicker, Presenter, SelectionView};
use boardfile_core::render::SelectOption;
use boardfile_core::{AttachmentKey, RawFile};

/// Picker preloaded with files read from disk.
#[derive(Debug, Default)]
pub struct QueuedPicker {
    chosen: Vec<RawFile>,
}

impl QueuedPicker {
    pub const fn new(chosen: Vec<RawFile>) -> Self {
        Self { chosen }
    }
}

impl FilePicker for QueuedPicker {
    fn chosen_files(&mut self) -> Vec<RawFile> {
        self.chosen.clone()
    }

    fn clear(&mut self) {
        self.chosen.clear();
    }

    fn set_label(&mut self, text: &str) {
        tracing::info!("{}", text);
    }
}

/// Selection list whose selection is fixed up front (the `--remove` keys).
///
/// Rendered options are shared so the command can print them afterwards.
#[derive(Debug, Clone, Default)]
pub struct PresetSelection {
    selected: Vec<AttachmentKey>,
    rendered: Rc<RefCell<Vec<SelectOption>>>,
}

impl PresetSelection {
    pub fn new(selected: &[String]) -> Self {
        Self {
            selected: selected
                .iter()
                .map(|key| AttachmentKey::from(key.trim()))
                .collect(),
            rendered: Rc::default(),
        }
    }

    pub fn rendered(&self) -> Vec<SelectOption> {
        self.rendered.borrow().clone()
    }
}

impl SelectionView for PresetSelection {
    fn render(&mut self, options: &[SelectOption]) {
        tracing::debug!("Rendering {} attachment options", options.len());
        *self.rendered.borrow_mut() = options.to_vec();
    }

    fn selected_keys(&self) -> Vec<AttachmentKey> {
        self.selected.clone()
    }
}

/// Prints navigation targets to stdout and alerts to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn navigate(&mut self, url: &str) {
        println!("{url}");
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
