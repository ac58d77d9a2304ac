//! Attachment manager configuration.
//!
//! Values come from the environment (see the `BOARDFILE_*` constants) or a
//! JSON document. Blank strings count as absent.

mod messages;

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use messages::{Locale, Messages};

use crate::util::{is_http_url, normalize_text_option};
use crate::{Error, Result};

const ENV_ACTION_URL: &str = "BOARDFILE_ACTION_URL";
const ENV_ENTITY_ID: &str = "BOARDFILE_ENTITY_ID";
const ENV_FILE_FIELD: &str = "BOARDFILE_FILE_FIELD";
const ENV_LOCALE: &str = "BOARDFILE_LOCALE";
const ENV_REQUEST_TIMEOUT_SECS: &str = "BOARDFILE_REQUEST_TIMEOUT_SECS";

const DEFAULT_ENTITY_ID: &str = "BOARD";
const DEFAULT_FILE_FIELD: &str = "file";

/// Settings for one attachment manager instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagerConfig {
    /// Submission endpoint. Without it the save trigger is inert.
    pub action_url: Option<String>,
    /// Owning entity type sent as `baseFileInfo.id`.
    pub entity_id: String,
    /// Multipart field name shared by all uploaded binaries.
    pub file_field: String,
    pub locale: Locale,
    /// Client-side request timeout. Unset means wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            action_url: None,
            entity_id: DEFAULT_ENTITY_ID.to_string(),
            file_field: DEFAULT_FILE_FIELD.to_string(),
            locale: Locale::default(),
            request_timeout_secs: None,
        }
    }
}

impl ManagerConfig {
    /// Config with only the action URL set.
    pub fn for_action_url(action_url: impl Into<String>) -> Result<Self> {
        Self {
            action_url: Some(action_url.into()),
            ..Self::default()
        }
        .normalized()
    }

    /// Load configuration from `BOARDFILE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        parse_config(|key| env::var(key).ok())
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(payload: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(payload)
            .map_err(|error| Error::Config(format!("invalid configuration JSON: {error}")))?;
        config.normalized()
    }

    /// Trim values, restore defaults for blanks, and validate the action URL.
    pub fn normalized(self) -> Result<Self> {
        let action_url = match normalize_text_option(self.action_url) {
            Some(url) if is_http_url(&url) => Some(url),
            Some(url) => {
                return Err(Error::Config(format!(
                    "action URL '{url}' must include http:// or https://"
                )))
            }
            None => None,
        };
        let entity_id = normalize_text_option(Some(self.entity_id))
            .unwrap_or_else(|| DEFAULT_ENTITY_ID.to_string());
        let file_field = normalize_text_option(Some(self.file_field))
            .unwrap_or_else(|| DEFAULT_FILE_FIELD.to_string());
        if self.request_timeout_secs == Some(0) {
            return Err(Error::Config(
                "request timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            action_url,
            entity_id,
            file_field,
            locale: self.locale,
            request_timeout_secs: self.request_timeout_secs,
        })
    }

    pub fn messages(&self) -> Messages {
        Messages::for_locale(self.locale)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_config(lookup: impl Fn(&str) -> Option<String>) -> Result<ManagerConfig> {
    let defaults = ManagerConfig::default();

    let locale = match normalize_text_option(lookup(ENV_LOCALE)) {
        Some(raw) => raw
            .parse()
            .map_err(|error| Error::Config(format!("{ENV_LOCALE}: {error}")))?,
        None => defaults.locale,
    };
    let request_timeout_secs = match normalize_text_option(lookup(ENV_REQUEST_TIMEOUT_SECS)) {
        Some(raw) => Some(raw.parse::<u64>().map_err(|error| {
            Error::Config(format!("{ENV_REQUEST_TIMEOUT_SECS}: {error}"))
        })?),
        None => None,
    };

    ManagerConfig {
        action_url: lookup(ENV_ACTION_URL),
        entity_id: lookup(ENV_ENTITY_ID).unwrap_or(defaults.entity_id),
        file_field: lookup(ENV_FILE_FIELD).unwrap_or(defaults.file_field),
        locale,
        request_timeout_secs,
    }
    .normalized()
}
