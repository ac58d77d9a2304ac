//! Interpretation of the submit response.
//!
//! The body is parsed as JSON whatever the status. A failure status turns
//! the body into an [`ErrorPayload`]; anything else is a success, which only
//! has an effect when it carries `redirectUrl`.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Messages;
use crate::util::compact_text;
use crate::Error;

/// What the user gets to see after a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Navigate to the given URL.
    Navigate(String),
    /// Show a blocking message.
    Alert(String),
    /// Success without a redirect target; nothing to do.
    Completed,
}

/// Error body returned with a failure status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub user_error: Option<Value>,
    #[serde(default)]
    pub field_errors: Option<Value>,
}

impl ErrorPayload {
    /// Text to show the user.
    ///
    /// Validation errors list one `field: message` line per field under the
    /// base message. Otherwise `error`, then `message`, then the generic
    /// failure string.
    pub fn user_message(&self, messages: &Messages) -> String {
        let is_user_error = matches!(self.user_error, Some(Value::Bool(true)));
        if let (true, Some(Value::Object(fields))) = (is_user_error, &self.field_errors) {
            let lines = fields
                .iter()
                .map(|(field, message)| format!("{field}: {}", value_text(message)))
                .collect::<Vec<_>>()
                .join("\n");
            let base = non_empty_text(self.message.as_ref())
                .or_else(|| non_empty_text(self.error.as_ref()))
                .unwrap_or_else(|| messages.generic_failure.to_string());
            return format!("{base}\n\n{lines}");
        }

        non_empty_text(self.error.as_ref())
            .or_else(|| non_empty_text(self.message.as_ref()))
            .unwrap_or_else(|| messages.generic_failure.to_string())
    }
}

/// Map a received response to an outcome.
pub fn interpret_response(status: u16, body: &[u8], messages: &Messages) -> SubmitOutcome {
    let payload: Value = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(error) => {
            tracing::error!(
                "Submit response (HTTP {}) is not valid JSON: {}; body: {}",
                status,
                error,
                compact_text(&String::from_utf8_lossy(body))
            );
            return SubmitOutcome::Alert(messages.generic_failure.to_string());
        }
    };

    if (200..300).contains(&status) {
        return match payload.get("redirectUrl").and_then(Value::as_str) {
            Some(url) if !url.trim().is_empty() => SubmitOutcome::Navigate(url.to_string()),
            _ => {
                tracing::debug!("Submit succeeded without a redirect target");
                SubmitOutcome::Completed
            }
        };
    }

    tracing::warn!("Submit rejected with HTTP {}", status);
    let error = serde_json::from_value::<ErrorPayload>(payload).unwrap_or_default();
    SubmitOutcome::Alert(error.user_message(messages))
}

/// Outcome for a request that never produced a response.
pub fn transport_failure(error: &Error, messages: &Messages) -> SubmitOutcome {
    tracing::error!("Submit request failed: {}", error);
    SubmitOutcome::Alert(messages.generic_failure.to_string())
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    let text = value_text(value?);
    (!text.is_empty()).then_some(text)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
