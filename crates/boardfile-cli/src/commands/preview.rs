use std::path::Path;

use boardfile_core::render::SelectOption;
use boardfile_core::submit::{build_payload, FileInfo};
use serde::Serialize;

use crate::cli::ChangeArgs;
use crate::commands::common::{prepare_manager, resolve_config, PreparedManager};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct PreviewReport {
    pub action_url: Option<String>,
    pub options: Vec<SelectOption>,
    pub form_fields: Vec<(String, String)>,
    pub uploads: Vec<FileInfo>,
    pub remove_keys: Vec<String>,
}

pub fn run_preview(
    changes: &ChangeArgs,
    as_json: bool,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let config = resolve_config(config_path, changes, None, None)?;
    let prepared = prepare_manager(config, changes)?;
    let report = build_report(&prepared);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in format_report_lines(&report) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn build_report(prepared: &PreparedManager) -> PreviewReport {
    let manager = &prepared.manager;
    let payload = build_payload(manager.snapshot(), prepared.fields.clone(), manager.config());

    PreviewReport {
        action_url: manager.config().action_url.clone(),
        options: prepared.selection.rendered(),
        form_fields: payload.form_fields,
        uploads: payload.file_info,
        remove_keys: payload.remove_files.key,
    }
}

pub fn format_report_lines(report: &PreviewReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.options.is_empty() {
        lines.push("No attachments".to_string());
    } else {
        lines.push("Attachments:".to_string());
        for option in &report.options {
            lines.push(format!("  {}  [{}]", option.label, option.value));
        }
    }

    lines.push(format!("Uploads: {}", report.uploads.len()));
    if report.remove_keys.is_empty() {
        lines.push("Removals: none".to_string());
    } else {
        lines.push(format!("Removals: {}", report.remove_keys.join(", ")));
    }
    lines
}
