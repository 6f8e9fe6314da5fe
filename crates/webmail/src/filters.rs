//! Server-side mail filter rules (Sieve).
//!
//! Rule lists are versioned by a data stamp. Every write passes the stamp
//! it was based on and receives the new one, so concurrent edits from
//! another client are rejected instead of overwritten.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::params::Single;
use crate::types::KId;

/// Message aspect a condition tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterConditionType {
    /// SMTP `RCPT TO`.
    #[serde(rename = "CtEnvelopeRecipient")]
    EnvelopeRecipient,
    /// SMTP `MAIL FROM`.
    #[serde(rename = "CtEnvelopeSender")]
    EnvelopeSender,
    /// `To` and `Cc` headers.
    #[serde(rename = "CtRecipient")]
    Recipient,
    /// `Sender` header.
    #[serde(rename = "CtSender")]
    Sender,
    /// `From` header.
    #[serde(rename = "CtFrom")]
    From,
    /// `Cc` header.
    #[serde(rename = "CtCc")]
    Cc,
    /// `To` header.
    #[serde(rename = "CtTo")]
    To,
    /// Subject.
    #[serde(rename = "CtSubject")]
    Subject,
    /// Has an attachment.
    #[serde(rename = "CtAttachment")]
    Attachment,
    /// Size in bytes.
    #[serde(rename = "CtSize")]
    Size,
    /// Classified as spam.
    #[serde(rename = "CtSpam")]
    Spam,
    /// Every message.
    #[default]
    #[serde(rename = "CtAll")]
    All,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

impl FilterConditionType {
    /// Returns true for targets tested without a comparator.
    #[must_use]
    pub const fn needs_comparator(self) -> bool {
        !matches!(self, Self::Attachment | Self::Spam | Self::All)
    }
}

/// How a condition target is compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterComparatorType {
    /// Equals.
    #[serde(rename = "CcEqual")]
    Equal,
    /// Contains.
    #[serde(rename = "CcContain")]
    Contain,
    /// Does not contain.
    #[serde(rename = "CcNotContain")]
    NotContain,
    /// Differs.
    #[serde(rename = "CcNotEqual")]
    NotEqual,
    /// Size below a byte count.
    #[serde(rename = "CcUnder")]
    Under,
    /// Size above a byte count.
    #[serde(rename = "CcOver")]
    Over,
    /// For attachment, spam and all-messages conditions.
    #[default]
    #[serde(rename = "CcNoComparator")]
    NoComparator,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Initial condition of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCondition {
    /// What the condition tests.
    pub tested_target: FilterConditionType,
    /// Must be [`FilterComparatorType::NoComparator`] when the target takes none.
    pub comparator: FilterComparatorType,
    /// Values the condition compares against.
    pub parameters: Vec<String>,
}

impl FilterCondition {
    /// Creates a condition comparing `target` against one value.
    #[must_use]
    pub fn new(
        tested_target: FilterConditionType,
        comparator: FilterComparatorType,
        value: impl Into<String>,
    ) -> Self {
        Self {
            tested_target,
            comparator,
            parameters: vec![value.into()],
        }
    }

    /// Condition matching every message.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            tested_target: FilterConditionType::All,
            comparator: FilterComparatorType::NoComparator,
            parameters: Vec::new(),
        }
    }
}

/// Filter action. The type fixes the number of parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterActionType {
    /// Header name, value. `Content-*` is forbidden.
    #[serde(rename = "FaAddHeader")]
    AddHeader,
    /// Header name, value. `Content-*` is forbidden.
    #[serde(rename = "FaSetHeader")]
    SetHeader,
    /// Header name. `Content-*` and `Received` are forbidden.
    #[serde(rename = "FaRemoveHeader")]
    RemoveHeader,
    /// Address.
    #[serde(rename = "FaAddRecipient")]
    AddRecipient,
    /// Address.
    #[serde(rename = "FaCopyToAddress")]
    CopyToAddress,
    /// Reason.
    #[serde(rename = "FaReject")]
    Reject,
    /// Folder path.
    #[serde(rename = "FaFileInto")]
    FileInto,
    /// Address.
    #[serde(rename = "FaRedirect")]
    Redirect,
    /// Delete the message.
    #[serde(rename = "FaDiscard")]
    Discard,
    /// Keep in the inbox.
    #[default]
    #[serde(rename = "FaKeep")]
    Keep,
    /// Address, subject, text.
    #[serde(rename = "FaNotify")]
    Notify,
    /// Mark as read.
    #[serde(rename = "FaSetReadFlag")]
    SetReadFlag,
    /// Reply text.
    #[serde(rename = "FaAutoReply")]
    AutoReply,
    /// Stop evaluating later rules.
    #[serde(rename = "FaStop")]
    Stop,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

impl FilterActionType {
    /// Number of parameters the action requires, or `None` for an action
    /// this client does not know.
    #[must_use]
    pub const fn parameter_count(self) -> Option<usize> {
        match self {
            Self::Discard | Self::Keep | Self::SetReadFlag | Self::Stop => Some(0),
            Self::RemoveHeader
            | Self::AddRecipient
            | Self::CopyToAddress
            | Self::Reject
            | Self::FileInto
            | Self::Redirect
            | Self::AutoReply => Some(1),
            Self::AddHeader | Self::SetHeader => Some(2),
            Self::Notify => Some(3),
            Self::Unknown => None,
        }
    }
}

/// Action of a rule, run when its conditions match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterAction {
    /// Action.
    #[serde(rename = "type")]
    pub kind: FilterActionType,
    /// Action arguments.
    pub parameters: Vec<String>,
}

impl FilterAction {
    /// Creates an action with its parameters.
    #[must_use]
    pub fn new<I, S>(kind: FilterActionType, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the parameter count fits the action type.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.kind
            .parameter_count()
            .is_none_or(|count| count == self.parameters.len())
    }
}

/// How the conditions of a rule combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationModeType {
    /// Any condition matches.
    #[serde(rename = "EmAnyOf")]
    AnyOf,
    /// All conditions match.
    #[default]
    #[serde(rename = "EmAllOf")]
    AllOf,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Structured filter rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterRule {
    /// Read-only.
    pub id: KId,
    /// Rule is active.
    pub is_enabled: bool,
    /// Rule name.
    pub description: String,
    /// Set when the rule has neither conditions nor actions.
    pub is_incomplete: bool,
    /// Conditions.
    pub conditions: Vec<FilterCondition>,
    /// What the update changes.
    pub actions: Vec<FilterAction>,
    /// How conditions combine.
    pub evaluation_mode: EvaluationModeType,
}

/// Filter rule as a Sieve script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterRawRule {
    /// Read-only.
    pub id: KId,
    /// Rule is active.
    pub is_enabled: bool,
    /// Rule name.
    pub description: String,
    /// Sieve script.
    pub script: String,
}

/// Rule list with the data stamp it was read at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterList {
    /// Version of the rule set.
    pub data_stamp: u64,
    /// Rules in evaluation order.
    pub filters: Vec<FilterRule>,
}

#[derive(Deserialize)]
struct RuleReply {
    rule: FilterRawRule,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StampReply {
    new_data_stamp: u64,
}

/// `Filters.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Filters<'a> {
    conn: &'a Connection,
}

impl<'a> Filters<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns all rules and the current data stamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self) -> Result<FilterList> {
        self.conn.call_without_params("Filters.get").await
    }

    /// Returns one rule as a script.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the stamp is outdated.
    pub async fn get_by_id(&self, current_data_stamp: u64, id: &KId) -> Result<FilterRawRule> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            current_data_stamp: u64,
            id: &'p KId,
        }

        let reply: RuleReply = self
            .conn
            .call(
                "Filters.getById",
                &Params {
                    current_data_stamp,
                    id,
                },
            )
            .await?;
        Ok(reply.rule)
    }

    /// Renders a structured rule as a script.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn generate_rule(&self, pattern: &FilterRule) -> Result<FilterRawRule> {
        let reply: RuleReply = self
            .conn
            .call("Filters.generateRule", &Single::new("pattern", pattern))
            .await?;
        Ok(reply.rule)
    }

    /// Replaces all rules. Returns the new data stamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the stamp is outdated.
    pub async fn set(&self, current_data_stamp: u64, filters: &[FilterRule]) -> Result<u64> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            current_data_stamp: u64,
            filters: &'p [FilterRule],
        }

        let reply: StampReply = self
            .conn
            .call(
                "Filters.set",
                &Params {
                    current_data_stamp,
                    filters,
                },
            )
            .await?;
        tracing::debug!(stamp = reply.new_data_stamp, "Filters updated");
        Ok(reply.new_data_stamp)
    }

    /// Replaces one rule given as a script. Returns the new data stamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the stamp is outdated.
    pub async fn set_by_id(&self, current_data_stamp: u64, rule: &FilterRawRule) -> Result<u64> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Params<'p> {
            current_data_stamp: u64,
            rule: &'p FilterRawRule,
        }

        let reply: StampReply = self
            .conn
            .call(
                "Filters.setById",
                &Params {
                    current_data_stamp,
                    rule,
                },
            )
            .await?;
        Ok(reply.new_data_stamp)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_parameter_count() {
        assert_eq!(FilterActionType::Stop.parameter_count(), Some(0));
        assert_eq!(FilterActionType::FileInto.parameter_count(), Some(1));
        assert_eq!(FilterActionType::SetHeader.parameter_count(), Some(2));
        assert_eq!(FilterActionType::Notify.parameter_count(), Some(3));
        assert_eq!(FilterActionType::Unknown.parameter_count(), None);

        assert!(FilterAction::new(FilterActionType::FileInto, ["INBOX/lists"]).is_complete());
        assert!(!FilterAction::new(FilterActionType::Notify, ["a@example.com"]).is_complete());
    }

    #[test]
    fn test_condition_comparator() {
        assert!(FilterConditionType::Subject.needs_comparator());
        assert!(!FilterConditionType::Spam.needs_comparator());
        let all = FilterCondition::all();
        assert_eq!(all.comparator, FilterComparatorType::NoComparator);
    }

    #[test]
    fn test_rule_wire_format() {
        let rule = FilterRule {
            is_enabled: true,
            description: "lists".to_string(),
            conditions: vec![FilterCondition::new(
                FilterConditionType::Subject,
                FilterComparatorType::Contain,
                "[rust]",
            )],
            actions: vec![
                FilterAction::new(FilterActionType::FileInto, ["INBOX/rust"]),
                FilterAction::new(FilterActionType::Stop, Vec::<String>::new()),
            ],
            evaluation_mode: EvaluationModeType::AnyOf,
            ..FilterRule::default()
        };
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            value["conditions"],
            json!([{"testedTarget": "CtSubject", "comparator": "CcContain", "parameters": ["[rust]"]}])
        );
        assert_eq!(value["actions"][0]["type"], "FaFileInto");
        assert_eq!(value["actions"][1]["parameters"], json!([]));
        assert_eq!(value["evaluationMode"], "EmAnyOf");
    }
}
