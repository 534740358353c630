//! Typed request inputs for the item-level operations.
//!
//! All input structs use `PascalCase` JSON field naming to match the store's
//! wire protocol. Optional fields are omitted when `None`, empty maps and
//! `Vec`s are omitted to produce minimal JSON payloads. Maps are ordered so
//! that serialization is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;
use crate::command::{Command, Item};
use crate::types::{ReturnValue, Select};

// ---------------------------------------------------------------------------
// Item writes
// ---------------------------------------------------------------------------

/// Input for the `PutItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemInput {
    /// The name of the table to put the item into.
    pub table_name: String,

    /// A map of attribute name to attribute value, representing the item.
    pub item: Item,

    /// A condition that must be satisfied for the put to succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,

    /// Substitution tokens for attribute names in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_names: BTreeMap<String, String>,

    /// Substitution tokens for attribute values in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_values: BTreeMap<String, AttributeValue>,

    /// Determines the attributes to return after the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValue>,
}

impl From<Command> for PutItemInput {
    fn from(command: Command) -> Self {
        Self {
            table_name: command.table_name,
            item: command.item.unwrap_or_default(),
            condition_expression: command.condition_expression,
            expression_attribute_names: command.expression_attribute_names.unwrap_or_default(),
            expression_attribute_values: command.expression_attribute_values.unwrap_or_default(),
            return_values: Some(command.return_values),
        }
    }
}

/// Input for the `UpdateItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemInput {
    /// The name of the table containing the item to update.
    pub table_name: String,

    /// The primary key of the item to be updated.
    pub key: Item,

    /// An expression that defines one or more attributes to be updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_expression: Option<String>,

    /// A condition that must be satisfied for the update to succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,

    /// Substitution tokens for attribute names in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_names: BTreeMap<String, String>,

    /// Substitution tokens for attribute values in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_values: BTreeMap<String, AttributeValue>,

    /// Determines the attributes to return after the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValue>,
}

impl From<Command> for UpdateItemInput {
    fn from(command: Command) -> Self {
        Self {
            table_name: command.table_name,
            key: command.key.unwrap_or_default(),
            update_expression: command.update_expression,
            condition_expression: command.condition_expression,
            expression_attribute_names: command.expression_attribute_names.unwrap_or_default(),
            expression_attribute_values: command.expression_attribute_values.unwrap_or_default(),
            return_values: Some(command.return_values),
        }
    }
}

/// Input for the `DeleteItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemInput {
    /// The name of the table from which to delete the item.
    pub table_name: String,

    /// The primary key of the item to delete.
    pub key: Item,

    /// A condition that must be satisfied for the deletion to succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,

    /// Substitution tokens for attribute names in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_names: BTreeMap<String, String>,

    /// Substitution tokens for attribute values in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_values: BTreeMap<String, AttributeValue>,

    /// Determines the attributes to return after the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValue>,
}

impl From<Command> for DeleteItemInput {
    fn from(command: Command) -> Self {
        Self {
            table_name: command.table_name,
            key: command.key.unwrap_or_default(),
            condition_expression: command.condition_expression,
            expression_attribute_names: command.expression_attribute_names.unwrap_or_default(),
            expression_attribute_values: command.expression_attribute_values.unwrap_or_default(),
            return_values: Some(command.return_values),
        }
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Input for the `GetItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemInput {
    /// The name of the table containing the item.
    pub table_name: String,

    /// The primary key of the item to retrieve.
    pub key: Item,

    /// If `true`, a strongly consistent read is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,

    /// A string that identifies the attributes to retrieve from the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,

    /// Substitution tokens for attribute names in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_names: BTreeMap<String, String>,
}

/// Input for the `Query` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryInput {
    /// The name of the table to query.
    pub table_name: String,

    /// The name of a secondary index to query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,

    /// The condition that specifies the key values for items to be retrieved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_condition_expression: Option<String>,

    /// A string that contains conditions for filtering the query results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,

    /// A string that identifies the attributes to retrieve from the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,

    /// Substitution tokens for attribute names in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_names: BTreeMap<String, String>,

    /// Substitution tokens for attribute values in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_values: BTreeMap<String, AttributeValue>,

    /// `true` (default) for ascending index traversal, `false` for descending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_index_forward: Option<bool>,

    /// The maximum number of items to evaluate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    /// The primary key of the first item to evaluate, for pagination.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub exclusive_start_key: Item,

    /// The attributes to be returned in the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,

    /// If `true`, a strongly consistent read is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
}

/// Input for the `Scan` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanInput {
    /// The name of the table to scan.
    pub table_name: String,

    /// The name of a secondary index to scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,

    /// A string that contains conditions for filtering the scan results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,

    /// A string that identifies the attributes to retrieve from the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,

    /// Substitution tokens for attribute names in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_names: BTreeMap<String, String>,

    /// Substitution tokens for attribute values in an expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub expression_attribute_values: BTreeMap<String, AttributeValue>,

    /// The maximum number of items to evaluate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    /// The primary key of the first item to evaluate, for pagination.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub exclusive_start_key: Item,

    /// For a parallel scan, the segment scanned by this worker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<i32>,

    /// For a parallel scan, the total number of segments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_segments: Option<i32>,

    /// The attributes to be returned in the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,

    /// If `true`, a strongly consistent read is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_carry_command_fields_into_update_input() {
        let command = Command {
            table_name: "users".to_owned(),
            update_expression: Some("REMOVE #n0".to_owned()),
            expression_attribute_names: Some(BTreeMap::from([(
                "#n0".to_owned(),
                "temp".to_owned(),
            )])),
            key: Some(BTreeMap::from([("id".to_owned(), AttributeValue::from("u1"))])),
            return_values: ReturnValue::UpdatedNew,
            ..Default::default()
        };
        let input = UpdateItemInput::from(command);
        assert_eq!(input.update_expression.as_deref(), Some("REMOVE #n0"));
        assert_eq!(input.key.len(), 1);
        assert_eq!(input.return_values, Some(ReturnValue::UpdatedNew));
        assert!(input.expression_attribute_values.is_empty());
    }

    #[test]
    fn test_should_skip_empty_maps_in_query_input() {
        let input = QueryInput {
            table_name: "events".to_owned(),
            key_condition_expression: Some("#n0 = :v0".to_owned()),
            ..Default::default()
        };
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(
            json,
            r##"{"TableName":"events","KeyConditionExpression":"#n0 = :v0"}"##
        );
    }

    #[test]
    fn test_should_serialize_put_item_input() {
        let input = PutItemInput {
            table_name: "users".to_owned(),
            item: BTreeMap::from([("id".to_owned(), AttributeValue::from("u1"))]),
            ..Default::default()
        };
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(json, r#"{"TableName":"users","Item":{"id":{"S":"u1"}}}"#);
    }
}
