use std::fs;
use std::path::{Path, PathBuf};

use boardfile_core::{
    AttachmentManager, ExistingAttachments, HttpTransport, Locale, ManagerConfig, RawFile,
};

use crate::cli::{ChangeArgs, LocaleArg};
use crate::error::CliError;
use crate::host::{PresetSelection, QueuedPicker, TerminalPresenter};

/// Manager with the CLI changes applied, plus the handles needed to report
/// on it.
pub struct PreparedManager {
    pub manager: AttachmentManager<HttpTransport>,
    pub selection: PresetSelection,
    pub fields: Vec<(String, String)>,
}

/// Resolve configuration: JSON file or `BOARDFILE_*` environment, then
/// command-line overrides.
pub fn resolve_config(
    config_path: Option<&Path>,
    changes: &ChangeArgs,
    url: Option<String>,
    timeout: Option<u64>,
) -> Result<ManagerConfig, CliError> {
    let mut config = match config_path {
        Some(path) => ManagerConfig::from_json_str(&read_text(path)?)?,
        None => ManagerConfig::from_env()?,
    };

    if url.is_some() {
        config.action_url = url;
    }
    if let Some(entity_id) = changes.entity_id.clone() {
        config.entity_id = entity_id;
    }
    if let Some(locale) = changes.locale {
        config.locale = match locale {
            LocaleArg::En => Locale::En,
            LocaleArg::Ko => Locale::Ko,
        };
    }
    if timeout.is_some() {
        config.request_timeout_secs = timeout;
    }

    Ok(config.normalized()?)
}

pub fn load_existing(path: Option<&Path>) -> Result<ExistingAttachments, CliError> {
    let Some(path) = path else {
        return Ok(ExistingAttachments::None);
    };
    Ok(ExistingAttachments::from_json_str(&read_text(path)?)?)
}

pub fn read_raw_files(paths: &[PathBuf]) -> Result<Vec<RawFile>, CliError> {
    paths
        .iter()
        .map(|path| {
            let bytes = fs::read(path).map_err(|source| CliError::ReadFile {
                path: path.display().to_string(),
                source,
            })?;
            let name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
            // Keyed by path so same-named files from different folders stay apart.
            Ok(RawFile::new(name, bytes).with_key(format!("new::{}", path.display())))
        })
        .collect()
}

pub fn parse_fields(raw_fields: &[String]) -> Result<Vec<(String, String)>, CliError> {
    raw_fields
        .iter()
        .map(|raw| {
            let (name, value) = raw
                .split_once('=')
                .ok_or_else(|| CliError::InvalidField(raw.clone()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(CliError::InvalidField(raw.clone()));
            }
            Ok((name.to_string(), value.to_string()))
        })
        .collect()
}

/// Build a manager seeded from `--existing`, then replay the picks and the
/// removal selection the way a user would in the form.
pub fn prepare_manager(
    config: ManagerConfig,
    changes: &ChangeArgs,
) -> Result<PreparedManager, CliError> {
    let existing = load_existing(changes.existing.as_deref())?;
    let files = read_raw_files(&changes.add)?;
    let fields = parse_fields(&changes.fields)?;
    let selection = PresetSelection::new(&changes.remove);

    let mut manager = AttachmentManager::builder(config)?
        .picker(QueuedPicker::new(files))
        .selection(selection.clone())
        .form(fields.clone())
        .presenter(TerminalPresenter)
        .existing(existing)
        .build()?;

    if !changes.add.is_empty() {
        let added = manager.on_files_selected();
        if added < changes.add.len() {
            tracing::warn!(
                "Skipped {} duplicate --add path(s); queued {} of {} files",
                changes.add.len() - added,
                added,
                changes.add.len()
            );
        } else {
            tracing::info!("Queued {} files for upload", added);
        }
    }
    if !changes.remove.is_empty() {
        let matched = manager.on_remove_requested();
        if matched < changes.remove.len() {
            tracing::warn!(
                "{} of {} removal keys did not match any attachment",
                changes.remove.len() - matched,
                changes.remove.len()
            );
        }
    }

    Ok(PreparedManager {
        manager,
        selection,
        fields,
    })
}

fn read_text(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}
