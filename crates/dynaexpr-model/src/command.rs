//! The compiled item-level command handed to a transport client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;
use crate::types::ReturnValue;

/// Attribute name to value map used for items and primary keys.
pub type Item = BTreeMap<String, AttributeValue>;

/// Output of one compilation: expressions, placeholder maps and payload.
///
/// Optional fields are omitted from JSON when absent so the serialized form
/// is exactly the store's item-level request shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Command {
    /// Target table.
    pub table_name: String,

    /// Rendered condition expression, absent when no condition was built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,

    /// Rendered update expression, absent when no update entries exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_expression: Option<String>,

    /// `#alias` to attribute path segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_names: Option<BTreeMap<String, String>>,

    /// `:alias` to literal value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_values: Option<BTreeMap<String, AttributeValue>>,

    /// Primary key of the targeted item (update/delete style operations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Item>,

    /// Full item payload (put style operations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,

    /// Attributes to return after the write.
    pub return_values: ReturnValue,
}
