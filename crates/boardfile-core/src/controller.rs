//! Attachment manager: wires host capabilities to the registry, keeps the
//! selection list in sync and runs the submit protocol.
//!
//! One manager per form. All mutations run synchronously in the triggering
//! event; only the network part of a submit is asynchronous. A submit works
//! on a payload captured when it was triggered (see [`PendingSubmit`]), so
//! the registry stays editable while a request is in flight.

use crate::config::{ManagerConfig, Messages};
use crate::host::{FilePicker, FormSource, LogPresenter, Presenter, SelectionView};
use crate::models::{AttachmentItem, ExistingAttachments};
use crate::registry::{AttachmentRegistry, Clock, RegistryListener};
use crate::render::{picker_label, render_options, SelectOption};
use crate::submit::{
    build_payload, interpret_response, transport_failure, SubmitOutcome, SubmitPayload,
};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, Result};

/// Re-renders the selection list after every registry change.
pub struct SelectionSync {
    view: Box<dyn SelectionView>,
    messages: Messages,
}

impl RegistryListener for SelectionSync {
    fn on_change(&mut self, items: &[AttachmentItem]) {
        let options = render_options(items, &self.messages);
        self.view.render(&options);
    }
}

/// Attachment manager for one host form.
pub struct AttachmentManager<T: Transport = HttpTransport> {
    registry: AttachmentRegistry<SelectionSync>,
    picker: Box<dyn FilePicker>,
    form: Box<dyn FormSource>,
    presenter: Box<dyn Presenter>,
    transport: T,
    config: ManagerConfig,
}

impl AttachmentManager<HttpTransport> {
    /// Start building a manager that submits over HTTP.
    pub fn builder(config: ManagerConfig) -> Result<AttachmentManagerBuilder<HttpTransport>> {
        let transport = HttpTransport::from_config(&config)?;
        Ok(AttachmentManagerBuilder::new(config, transport))
    }
}

impl<T: Transport + Clone> AttachmentManager<T> {
    /// Re-seed from existing attachments, discarding pending changes.
    pub fn initialize(&mut self, existing: ExistingAttachments) {
        self.registry.initialize(existing);
    }

    /// Select trigger: ask the picker to open its chooser.
    pub fn on_select_requested(&mut self) {
        self.picker.open();
    }

    /// Picker change: move chosen files into the registry, then reset the
    /// picker so the same file can be chosen again. Returns how many items
    /// were added.
    pub fn on_files_selected(&mut self) -> usize {
        let files = self.picker.chosen_files();
        let chosen = files.len();
        let added = self.registry.add_files(files);
        self.picker.clear();
        self.picker
            .set_label(&picker_label(chosen, &self.registry.listener().messages));
        added
    }

    /// Remove trigger: apply removal to whatever is selected in the list.
    pub fn on_remove_requested(&mut self) -> usize {
        let keys = self.registry.listener().view.selected_keys();
        self.registry.mark_for_removal(&keys)
    }

    /// Capture the payload for a submit.
    ///
    /// Returns `None` when no action URL is configured; the save trigger is
    /// inert in that case.
    pub fn begin_submit(&self) -> Option<PendingSubmit<T>> {
        let Some(url) = self.config.action_url.clone() else {
            tracing::warn!("Save requested but no action URL is configured");
            return None;
        };

        let payload = build_payload(self.registry.snapshot(), self.form.fields(), &self.config);
        Some(PendingSubmit {
            transport: self.transport.clone(),
            url,
            payload,
            messages: self.config.messages(),
        })
    }

    /// Surface an outcome through the presenter.
    pub fn present(&mut self, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Navigate(url) => self.presenter.navigate(url),
            SubmitOutcome::Alert(message) => self.presenter.alert(message),
            SubmitOutcome::Completed => {}
        }
    }

    /// Save trigger: submit, then present the outcome.
    ///
    /// Returns `None` when the save trigger is inert.
    pub async fn on_save_requested(&mut self) -> Option<SubmitOutcome> {
        let pending = self.begin_submit()?;
        let outcome = pending.send().await;
        self.present(&outcome);
        Some(outcome)
    }

    #[must_use]
    pub fn snapshot(&self) -> &[AttachmentItem] {
        self.registry.snapshot()
    }

    /// Options as currently rendered.
    pub fn options(&self) -> Vec<SelectOption> {
        render_options(self.registry.snapshot(), &self.registry.listener().messages)
    }

    pub const fn config(&self) -> &ManagerConfig {
        &self.config
    }
}

/// A submit whose payload is fixed; sending it does not touch the manager.
pub struct PendingSubmit<T> {
    transport: T,
    url: String,
    payload: SubmitPayload,
    messages: Messages,
}

impl<T: Transport> PendingSubmit<T> {
    pub const fn payload(&self) -> &SubmitPayload {
        &self.payload
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send the request and map the answer to an outcome. Never fails:
    /// transport and parse problems become a generic alert.
    pub async fn send(self) -> SubmitOutcome {
        match self.transport.send(&self.url, self.payload).await {
            Ok(response) => interpret_response(response.status, &response.body, &self.messages),
            Err(error) => transport_failure(&error, &self.messages),
        }
    }
}

/// Collects host capabilities for an [`AttachmentManager`].
pub struct AttachmentManagerBuilder<T> {
    config: ManagerConfig,
    transport: T,
    picker: Option<Box<dyn FilePicker>>,
    selection: Option<Box<dyn SelectionView>>,
    form: Option<Box<dyn FormSource>>,
    presenter: Option<Box<dyn Presenter>>,
    existing: ExistingAttachments,
    clock: Option<Box<dyn Clock>>,
}

impl<T: Transport + Clone> AttachmentManagerBuilder<T> {
    pub fn new(config: ManagerConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            picker: None,
            selection: None,
            form: None,
            presenter: None,
            existing: ExistingAttachments::None,
            clock: None,
        }
    }

    #[must_use]
    pub fn picker(mut self, picker: impl FilePicker + 'static) -> Self {
        self.picker = Some(Box::new(picker));
        self
    }

    #[must_use]
    pub fn selection(mut self, selection: impl SelectionView + 'static) -> Self {
        self.selection = Some(Box::new(selection));
        self
    }

    #[must_use]
    pub fn form(mut self, form: impl FormSource + 'static) -> Self {
        self.form = Some(Box::new(form));
        self
    }

    /// Where outcomes go; outcomes are only logged when unset.
    #[must_use]
    pub fn presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    #[must_use]
    pub fn existing(mut self, existing: ExistingAttachments) -> Self {
        self.existing = existing;
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Assemble the manager and render the seeded attachments.
    ///
    /// Fails with [`Error::Setup`] when the picker, selection list or form
    /// is missing.
    pub fn build(self) -> Result<AttachmentManager<T>> {
        let missing: Vec<&str> = [
            ("file picker", self.picker.is_none()),
            ("selection list", self.selection.is_none()),
            ("form", self.form.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(picker), Some(selection), Some(form)) = (self.picker, self.selection, self.form)
        else {
            let error = Error::Setup(format!("missing {}", missing.join(", ")));
            tracing::error!("{}", error);
            return Err(error);
        };

        let listener = SelectionSync {
            view: selection,
            messages: self.config.messages(),
        };
        let mut registry = AttachmentRegistry::new(listener);
        if let Some(clock) = self.clock {
            registry = registry.with_clock(clock);
        }
        registry.initialize(self.existing);

        Ok(AttachmentManager {
            registry,
            picker,
            form,
            presenter: self.presenter.unwrap_or_else(|| Box::new(LogPresenter)),
            transport: self.transport,
            config: self.config,
        })
    }
}
