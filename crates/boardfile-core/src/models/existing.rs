//! Host-supplied description of attachments the server already stores.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{AttachmentItem, AttachmentKey, Mode};
use crate::util::infer_content_type;

/// One server-known attachment as embedded in the host page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingAttachment {
    /// Explicit identifier; string or number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    /// Mode already assigned by the source, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Everything else (`seq`, storage paths, ...), kept opaque.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Existing attachments in any of the shapes a host may hand over:
/// nothing, a single object, or a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExistingAttachments {
    #[default]
    None,
    Many(Vec<Option<ExistingAttachment>>),
    One(ExistingAttachment),
}

impl ExistingAttachments {
    /// Parse the host JSON shape (`null`, an object, or an array).
    pub fn from_json_str(payload: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Flatten into an ordered list, dropping `null` entries.
    pub fn into_vec(self) -> Vec<ExistingAttachment> {
        match self {
            Self::None => Vec::new(),
            Self::One(attachment) => vec![attachment],
            Self::Many(list) => list.into_iter().flatten().collect(),
        }
    }

    /// Normalize into registry items.
    ///
    /// Items default to `UPD`. The key falls back to `seq`, then to the
    /// position in the list. A source-assigned `REG` cannot be honoured
    /// without bytes and is downgraded to `UPD`.
    pub fn into_items(self) -> Vec<AttachmentItem> {
        self.into_vec()
            .into_iter()
            .enumerate()
            .map(|(index, attachment)| attachment.into_item(index))
            .collect()
    }
}

impl From<ExistingAttachment> for ExistingAttachments {
    fn from(value: ExistingAttachment) -> Self {
        Self::One(value)
    }
}

impl From<Vec<ExistingAttachment>> for ExistingAttachments {
    fn from(value: Vec<ExistingAttachment>) -> Self {
        Self::Many(value.into_iter().map(Some).collect())
    }
}

impl ExistingAttachment {
    fn into_item(self, index: usize) -> AttachmentItem {
        let key = self
            .key
            .as_ref()
            .and_then(value_as_key)
            .or_else(|| self.extra.get("seq").and_then(value_as_key))
            .unwrap_or_else(|| {
                tracing::warn!(
                    "Existing attachment '{}' has no key or seq; using position {}",
                    self.name,
                    index
                );
                format!("existing::{index}")
            });

        let removed = match self.mode {
            None | Some(Mode::Upd) => false,
            Some(Mode::Del) => true,
            Some(Mode::Reg) => {
                tracing::warn!(
                    "Existing attachment '{}' is tagged REG without file bytes; keeping it as UPD",
                    key
                );
                false
            }
        };

        let content_type = infer_content_type(self.content_type.as_deref(), &self.name);
        AttachmentItem::existing(
            AttachmentKey::from(key),
            self.name,
            self.size,
            content_type,
            self.extra,
            removed,
        )
    }
}

fn value_as_key(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => (!text.trim().is_empty()).then(|| text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn null_and_empty_list_yield_nothing() {
        assert!(ExistingAttachments::from_json_str("null")
            .unwrap()
            .into_items()
            .is_empty());
        assert!(ExistingAttachments::from_json_str("[]")
            .unwrap()
            .into_items()
            .is_empty());
        assert!(ExistingAttachments::default().into_items().is_empty());
    }

    #[test]
    fn single_object_is_wrapped_as_kept_item() {
        let items = ExistingAttachments::from_json_str(r#"{"seq": 7, "name": "b.pdf"}"#)
            .unwrap()
            .into_items();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].key().as_str(), "7");
        assert_eq!(items[0].mode(), Mode::Upd);
        assert_eq!(items[0].name, "b.pdf");
        assert_eq!(items[0].content_type, "application/pdf");
        assert_eq!(items[0].extra.get("seq"), Some(&Value::from(7)));
    }

    #[test]
    fn list_preserves_order_and_skips_nulls() {
        let payload = r#"[
            {"key": "a", "name": "one.txt", "size": 3, "contentType": "text/plain"},
            null,
            {"seq": "12", "name": "two.png", "size": 9, "type": "image/png", "mode": "DEL"}
        ]"#;
        let items = ExistingAttachments::from_json_str(payload)
            .unwrap()
            .into_items();

        let summary: Vec<(&str, Mode, &str)> = items
            .iter()
            .map(|item| (item.key().as_str(), item.mode(), item.content_type.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a", Mode::Upd, "text/plain"),
                ("12", Mode::Del, "image/png"),
            ]
        );
    }

    #[test]
    fn server_key_is_kept_verbatim() {
        let items = ExistingAttachments::from_json_str(
            r#"[{"key": " k1 ", "name": "a"}, {"key": "  ", "seq": 4, "name": "b"}]"#,
        )
        .unwrap()
        .into_items();
        assert_eq!(items[0].key().as_str(), " k1 ");
        assert_eq!(items[1].key().as_str(), "4");
    }

    #[test]
    fn missing_identifier_falls_back_to_position() {
        let items = ExistingAttachments::from_json_str(r#"[{"name": "x"}, {"name": "y"}]"#)
            .unwrap()
            .into_items();
        assert_eq!(items[0].key().as_str(), "existing::0");
        assert_eq!(items[1].key().as_str(), "existing::1");
    }

    #[test]
    fn source_reg_mode_is_downgraded() {
        let items =
            ExistingAttachments::from_json_str(r#"{"key": "k", "name": "a.png", "mode": "REG"}"#)
                .unwrap()
                .into_items();
        assert_eq!(items[0].mode(), Mode::Upd);
        assert!(items[0].binary().is_none());
    }
}
