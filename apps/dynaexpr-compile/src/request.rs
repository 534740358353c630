//! JSON operation descriptions accepted on input.
//!
//! A request names its operation in the `Operation` field; the remaining
//! fields mirror the matching builder. Conditions and updates use the AST's
//! own JSON form:
//!
//! ```text
//! {
//!   "Operation": "UpdateItem",
//!   "TableName": "counters",
//!   "Key": {"id": {"S": "page-1"}},
//!   "Condition": {"AttributeFunction": {"Path": "id", "Function": "attribute_exists"}},
//!   "Update": {"RemovePaths": ["temp"]}
//! }
//! ```

use anyhow::{Context, Result, bail};
use dynaexpr_core::expression::{Condition, UpdateNode};
use dynaexpr_core::{
    ConditionBuilder, Conditional, DeleteItem, Filtered, GetItem, PutItem, Query, Scan,
    UpdateBuilder, UpdateItem,
};
use dynaexpr_model::{Item, ReturnValue, Select};
use serde::Deserialize;
use serde_json::Value;

/// One operation to compile.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "Operation")]
pub enum OperationRequest {
    /// Conditional put of a whole item.
    PutItem(PutItemRequest),
    /// Update of an existing item.
    UpdateItem(UpdateItemRequest),
    /// Conditional delete.
    DeleteItem(DeleteItemRequest),
    /// Point read.
    GetItem(GetItemRequest),
    /// Key-condition query.
    Query(QueryRequest),
    /// Full or parallel scan.
    Scan(ScanRequest),
}

/// `PutItem` description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemRequest {
    table_name: String,
    item: Item,
    #[serde(default)]
    condition: Option<Condition>,
    #[serde(default)]
    return_values: Option<ReturnValue>,
}

/// `UpdateItem` description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemRequest {
    table_name: String,
    key: Item,
    #[serde(default)]
    condition: Option<Condition>,
    #[serde(default)]
    update: UpdateNode,
    #[serde(default)]
    return_values: Option<ReturnValue>,
}

/// `DeleteItem` description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemRequest {
    table_name: String,
    key: Item,
    #[serde(default)]
    condition: Option<Condition>,
    #[serde(default)]
    return_values: Option<ReturnValue>,
}

/// `GetItem` description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemRequest {
    table_name: String,
    key: Item,
    #[serde(default)]
    projection: Vec<String>,
    #[serde(default)]
    consistent_read: Option<bool>,
}

/// `Query` description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryRequest {
    table_name: String,
    key_condition: Condition,
    #[serde(default)]
    index_name: Option<String>,
    #[serde(default)]
    filter: Option<Condition>,
    #[serde(default)]
    projection: Vec<String>,
    #[serde(default)]
    limit: Option<i32>,
    #[serde(default)]
    scan_index_forward: Option<bool>,
    #[serde(default)]
    consistent_read: Option<bool>,
    #[serde(default)]
    select: Option<Select>,
    #[serde(default)]
    exclusive_start_key: Item,
}

/// `Scan` description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanRequest {
    table_name: String,
    #[serde(default)]
    index_name: Option<String>,
    #[serde(default)]
    filter: Option<Condition>,
    #[serde(default)]
    projection: Vec<String>,
    #[serde(default)]
    limit: Option<i32>,
    #[serde(default)]
    segment: Option<i32>,
    #[serde(default)]
    total_segments: Option<i32>,
    #[serde(default)]
    consistent_read: Option<bool>,
    #[serde(default)]
    select: Option<Select>,
    #[serde(default)]
    exclusive_start_key: Item,
}

impl OperationRequest {
    /// The operation name, as given in the `Operation` field.
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            Self::PutItem(_) => "PutItem",
            Self::UpdateItem(_) => "UpdateItem",
            Self::DeleteItem(_) => "DeleteItem",
            Self::GetItem(_) => "GetItem",
            Self::Query(_) => "Query",
            Self::Scan(_) => "Scan",
        }
    }

    /// Run the request through its builder and return the compiled input.
    pub fn compile(self) -> Result<Value> {
        let compiled = match self {
            Self::PutItem(req) => {
                let op = PutItem::new(req.table_name).item(req.item);
                let mut op = with_condition(op, req.condition);
                if let Some(rv) = req.return_values {
                    op = op.return_values(rv);
                }
                serde_json::to_value(op.build()?)
            }
            Self::UpdateItem(req) => {
                let update = UpdateBuilder::from_node(req.update).context("invalid update")?;
                let mut op = req
                    .key
                    .into_iter()
                    .fold(UpdateItem::new(req.table_name), |op, (k, v)| op.key(k, v))
                    .with_update(update);
                op = with_condition(op, req.condition);
                if let Some(rv) = req.return_values {
                    op = op.return_values(rv);
                }
                serde_json::to_value(op.build()?)
            }
            Self::DeleteItem(req) => {
                let op = req
                    .key
                    .into_iter()
                    .fold(DeleteItem::new(req.table_name), |op, (k, v)| op.key(k, v));
                let mut op = with_condition(op, req.condition);
                if let Some(rv) = req.return_values {
                    op = op.return_values(rv);
                }
                serde_json::to_value(op.build()?)
            }
            Self::GetItem(req) => {
                let mut op = req
                    .key
                    .into_iter()
                    .fold(GetItem::new(req.table_name), |op, (k, v)| op.key(k, v))
                    .projection(&as_strs(&req.projection))?;
                if let Some(consistent) = req.consistent_read {
                    op = op.consistent_read(consistent);
                }
                serde_json::to_value(op.build()?)
            }
            Self::Query(req) => {
                let mut op = Query::new(req.table_name)
                    .with_key_condition(req.key_condition)
                    .context("invalid key condition")?
                    .projection(&as_strs(&req.projection))?
                    .exclusive_start_key(req.exclusive_start_key);
                op = with_filter(op, req.filter);
                if let Some(index) = req.index_name {
                    op = op.index_name(index);
                }
                if let Some(limit) = req.limit {
                    op = op.limit(limit);
                }
                if let Some(forward) = req.scan_index_forward {
                    op = op.scan_index_forward(forward);
                }
                if let Some(consistent) = req.consistent_read {
                    op = op.consistent_read(consistent);
                }
                if let Some(select) = req.select {
                    op = op.select(select);
                }
                serde_json::to_value(op.build()?)
            }
            Self::Scan(req) => {
                let mut op = Scan::new(req.table_name)
                    .projection(&as_strs(&req.projection))?
                    .exclusive_start_key(req.exclusive_start_key);
                op = with_filter(op, req.filter);
                match (req.segment, req.total_segments) {
                    (Some(segment), Some(total)) => op = op.segment(segment, total)?,
                    (None, None) => {}
                    _ => bail!("Segment and TotalSegments must be given together"),
                }
                if let Some(index) = req.index_name {
                    op = op.index_name(index);
                }
                if let Some(limit) = req.limit {
                    op = op.limit(limit);
                }
                if let Some(consistent) = req.consistent_read {
                    op = op.consistent_read(consistent);
                }
                if let Some(select) = req.select {
                    op = op.select(select);
                }
                serde_json::to_value(op.build())
            }
        };
        compiled.context("failed to serialize compiled input")
    }
}

fn with_condition<T: Conditional>(op: T, condition: Option<Condition>) -> T {
    match condition {
        Some(condition) => op.with_conditions(ConditionBuilder::from_condition(condition)),
        None => op,
    }
}

fn with_filter<T: Filtered>(op: T, filter: Option<Condition>) -> T {
    match filter {
        Some(filter) => op.with_filters(ConditionBuilder::from_condition(filter)),
        None => op,
    }
}

fn as_strs(paths: &[String]) -> Vec<&str> {
    paths.iter().map(String::as_str).collect()
}
