//! Result shapes shared by list and bulk operations.
//!
//! Bulk operations (create, set, copy, move, remove) report failures per
//! input item. A call that fails for some items still succeeds as a whole;
//! the caller pairs [`ItemError::input_index`] with its input.

use serde::{Deserialize, Serialize};
use webmail_rpc::render_placeholders;

use super::identifiers::{KId, Watermark};
use super::null_as_default;

/// Message with `%1`-style placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizableMessage {
    /// Text with placeholders.
    pub message: String,
    /// Placeholder values; the first replaces `%1`.
    pub positional_parameters: Vec<String>,
    /// Count of items, selects singular or plural forms.
    pub plurality: i32,
}

impl LocalizableMessage {
    /// Returns the message with placeholders substituted.
    #[must_use]
    pub fn render(&self) -> String {
        render_placeholders(&self.message, &self.positional_parameters)
    }
}

/// Placeholder values of a message carried separately from its text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizableMessageParameters {
    /// Placeholder values.
    pub positional_parameters: Vec<String>,
    /// Count of items.
    pub plurality: i32,
}

/// Failure of a single item within a bulk operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemError {
    /// 0-based index into the input list.
    pub input_index: usize,
    /// Error code.
    pub code: i32,
    /// Text with placeholders.
    pub message: String,
    /// Placeholder values.
    pub message_parameters: LocalizableMessageParameters,
}

impl ItemError {
    /// Returns the message with placeholders substituted.
    #[must_use]
    pub fn render(&self) -> String {
        render_placeholders(&self.message, &self.message_parameters.positional_parameters)
    }

    /// Returns the code as a known error code.
    #[must_use]
    pub const fn error_code(&self) -> webmail_rpc::ErrorCode {
        webmail_rpc::ErrorCode::from_code(self.code)
    }
}

/// Error attached to an entity id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManipulationError {
    /// Entity id.
    pub id: KId,
    /// Error.
    pub error_message: LocalizableMessage,
}

/// Outcome of one successfully created item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateResult {
    /// 0-based index into the input list.
    pub input_index: usize,
    /// Id of the new item.
    pub id: KId,
    /// Item version.
    pub watermark: Watermark,
}

/// Outcome of one successfully updated item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetResult {
    /// 0-based index into the input list.
    pub input_index: usize,
    /// New id if the update moved the item, empty otherwise.
    pub id: KId,
    /// Item version.
    pub watermark: Watermark,
}

/// Outcome of a bulk operation: per-item errors plus per-item results.
///
/// A missing or `null` member reads as an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct BatchResult<T> {
    /// Failed items.
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ItemError>,
    /// Succeeded items.
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: Vec<T>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        Self {
            errors: Vec::new(),
            result: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    /// Returns true if no item failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the input indices of failed items, in server order.
    #[must_use]
    pub fn failed_indices(&self) -> Vec<usize> {
        self.errors.iter().map(|e| e.input_index).collect()
    }

    /// Returns the error reported for the given input index.
    #[must_use]
    pub fn error_for(&self, input_index: usize) -> Option<&ItemError> {
        self.errors.iter().find(|e| e.input_index == input_index)
    }
}

impl BatchResult<CreateResult> {
    /// Returns the result for the given input index.
    #[must_use]
    pub fn created(&self, input_index: usize) -> Option<&CreateResult> {
        self.result.iter().find(|r| r.input_index == input_index)
    }
}

/// One page of a list operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Items of this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub list: Vec<T>,
    /// Number of items matching the query across all pages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_items: i64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            total_items: 0,
        }
    }
}

/// List result without a total count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ListResult<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub list: Vec<T>,
}

/// Result carrying only per-item errors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ErrorsResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ItemError>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_batch() {
        let batch: BatchResult<CreateResult> = serde_json::from_value(json!({
            "errors": [{"inputIndex": 1, "code": 1000, "message": "bad"}],
            "result": [
                {"inputIndex": 0, "id": "c0", "watermark": 11},
                {"inputIndex": 2, "id": "c2", "watermark": 12}
            ]
        }))
        .unwrap();

        assert!(!batch.is_complete());
        assert_eq!(batch.failed_indices(), vec![1]);
        assert_eq!(batch.created(2).unwrap().id.as_str(), "c2");
        assert!(batch.created(1).is_none());
        assert_eq!(batch.error_for(1).unwrap().message, "bad");
    }

    #[test]
    fn test_batch_missing_members() {
        let batch: BatchResult<SetResult> = serde_json::from_value(json!({})).unwrap();
        assert!(batch.is_complete());
        assert!(batch.result.is_empty());
    }

    #[test]
    fn test_batch_null_members() {
        let batch: BatchResult<CreateResult> =
            serde_json::from_str(r#"{"errors":null,"result":[]}"#).unwrap();
        assert!(batch.is_complete());

        let batch: BatchResult<SetResult> = serde_json::from_str(
            r#"{"errors":[{"inputIndex":0,"code":1002,"message":"gone"}],"result":null}"#,
        )
        .unwrap();
        assert_eq!(batch.failed_indices(), vec![0]);
        assert!(batch.result.is_empty());
    }

    #[test]
    fn test_page_null_members() {
        let page: Page<String> =
            serde_json::from_str(r#"{"list":null,"totalItems":null}"#).unwrap();
        assert!(page.list.is_empty());
        assert_eq!(page.total_items, 0);

        let errors: ErrorsResult = serde_json::from_str(r#"{"errors":null}"#).unwrap();
        assert!(errors.errors.is_empty());
    }

    /// Element type without a `Default` impl.
    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_containers_need_no_default_elements() {
        let page: Page<Named> =
            serde_json::from_value(json!({"list": [{"name": "a"}], "totalItems": 1})).unwrap();
        assert_eq!(page.list[0].name, "a");

        let batch: BatchResult<Named> =
            serde_json::from_value(json!({"result": [{"name": "b"}]})).unwrap();
        assert_eq!(batch.result[0].name, "b");

        let list: ListResult<Named> = serde_json::from_value(json!({})).unwrap();
        assert!(list.list.is_empty());
    }

    #[test]
    fn test_page() {
        let page: Page<String> =
            serde_json::from_value(json!({"list": ["a", "b"], "totalItems": 7})).unwrap();
        assert_eq!(page.list.len(), 2);
        assert_eq!(page.total_items, 7);
    }

    #[test]
    fn test_localizable_render() {
        let msg = LocalizableMessage {
            message: "User %1 cannot be deleted.".to_string(),
            positional_parameters: vec!["jdoe".to_string()],
            plurality: 1,
        };
        assert_eq!(msg.render(), "User jdoe cannot be deleted.");
    }

    #[test]
    fn test_item_error_render() {
        let err: ItemError = serde_json::from_value(json!({
            "inputIndex": 0,
            "code": 1003,
            "message": "Cannot remove %1",
            "messageParameters": {"positionalParameters": ["Inbox"], "plurality": 1}
        }))
        .unwrap();
        assert_eq!(err.render(), "Cannot remove Inbox");
        assert_eq!(err.error_code(), webmail_rpc::ErrorCode::NotPermitted);
    }
}
