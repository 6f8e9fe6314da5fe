//! Search query sent to list operations.

use serde::{Deserialize, Serialize};

/// `limit` value meaning "no limit".
pub const UNLIMITED: i32 = -1;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Comparison operator of a query condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOperator {
    /// `=`
    #[default]
    Eq,
    /// `<>`
    NotEq,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `<=`
    LessEq,
    /// `>=`
    GreaterEq,
    /// Substring match, `%` is a wildcard.
    Like,
}

/// How the conditions of a query are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    /// Any condition matches.
    #[default]
    Or,
    /// All conditions match.
    And,
}

/// A single `field <op> value` condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubCondition {
    /// Left side.
    pub field_name: String,
    /// Operator.
    pub comparator: CompareOperator,
    /// Right side.
    pub value: String,
}

/// Sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortOrder {
    /// Column to sort by.
    pub column_name: String,
    /// Direction.
    pub direction: SortDirection,
    /// Whether comparison is case sensitive.
    pub case_sensitive: bool,
}

/// Filter, paging and ordering for list operations.
///
/// An empty `fields` list selects all fields, an empty `conditions` list
/// matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    /// Fields to return.
    pub fields: Vec<String>,
    /// Conditions.
    pub conditions: Vec<SubCondition>,
    /// Condition combination.
    pub combining: LogicalOperator,
    /// Items to skip.
    pub start: i32,
    /// Maximum items to return, [`UNLIMITED`] for all.
    pub limit: i32,
    /// Ordering.
    pub order_by: Vec<SortOrder>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            conditions: Vec::new(),
            combining: LogicalOperator::Or,
            start: 0,
            limit: UNLIMITED,
            order_by: Vec::new(),
        }
    }
}

impl SearchQuery {
    /// Creates a query matching everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the returned fields.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a condition.
    #[must_use]
    pub fn condition(
        mut self,
        field_name: impl Into<String>,
        comparator: CompareOperator,
        value: impl Into<String>,
    ) -> Self {
        self.conditions.push(SubCondition {
            field_name: field_name.into(),
            comparator,
            value: value.into(),
        });
        self
    }

    /// Sets how conditions are combined.
    #[must_use]
    pub const fn combining(mut self, combining: LogicalOperator) -> Self {
        self.combining = combining;
        self
    }

    /// Sets the paging window.
    #[must_use]
    pub const fn page(mut self, start: i32, limit: i32) -> Self {
        self.start = start;
        self.limit = limit;
        self
    }

    /// Adds a sort key.
    #[must_use]
    pub fn order_by(mut self, column_name: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by.push(SortOrder {
            column_name: column_name.into(),
            direction,
            case_sensitive: false,
        });
        self
    }
}
