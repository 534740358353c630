//! Renders condition and update ASTs into placeholder-based expression text.
//!
//! The top-level condition group is rendered with the wire grammar's native
//! precedence (AND binds tighter than OR), so it never needs parentheses.
//! Nested groups are always parenthesized. `NOT` over a group with more than
//! one entry parenthesizes that group.
//!
//! Update clauses are emitted in the order SET, REMOVE, ADD, DELETE. Empty
//! clauses are omitted.

use std::collections::BTreeMap;

use dynaexpr_model::{AttributeValue, Command};
use tracing::{debug, trace};

use super::ast::{AttributePath, Condition, GroupEntry, OperationNode, SetAction, SetValue, UpdateNode};
use super::placeholder::{PlaceholderTable, Placeholders};

/// Compile one item-level write into the store's command shape.
///
/// The condition is rendered before the update so that a path referenced by
/// both reuses the alias allocated for the condition. Alias numbering starts
/// at zero on every call, making the output deterministic.
#[must_use]
pub fn compile(node: &OperationNode) -> Command {
    let mut compiler = Compiler::new();
    let condition_expression = compiler.condition(&node.condition);
    let update_expression = compiler.update(&node.update);
    let Placeholders { names, values } = compiler.finish();

    debug!(
        table = %node.table_name,
        names = names.len(),
        values = values.len(),
        has_condition = condition_expression.is_some(),
        has_update = update_expression.is_some(),
        "compiled operation"
    );

    Command {
        table_name: node.table_name.clone(),
        condition_expression,
        update_expression,
        expression_attribute_names: non_empty(names),
        expression_attribute_values: non_empty(values),
        key: non_empty(node.key.clone()),
        item: non_empty(node.item.clone()),
        return_values: node.return_values.unwrap_or_default(),
    }
}

fn non_empty<K, V>(map: BTreeMap<K, V>) -> Option<BTreeMap<K, V>> {
    (!map.is_empty()).then_some(map)
}

/// Renders several expressions against one shared [`PlaceholderTable`].
///
/// Used directly by requests carrying more than one expression (e.g. a
/// query's key condition, filter and projection).
#[derive(Debug, Default)]
pub struct Compiler {
    table: PlaceholderTable,
}

impl Compiler {
    /// A compiler with a fresh placeholder table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a condition tree; `None` when it contains no conditions.
    pub fn condition(&mut self, condition: &Condition) -> Option<String> {
        let rendered = match condition {
            Condition::Group(entries) => self.entries(entries),
            other => self.node(other),
        };
        trace!(expression = ?rendered, "rendered condition");
        rendered
    }

    /// Render an update node; `None` when every clause is empty.
    pub fn update(&mut self, update: &UpdateNode) -> Option<String> {
        let mut clauses = Vec::new();

        if !update.set_actions.is_empty() {
            let actions: Vec<String> = update
                .set_actions
                .iter()
                .map(|action| self.set_action(action))
                .collect();
            clauses.push(format!("SET {}", actions.join(", ")));
        }
        if !update.remove_paths.is_empty() {
            let paths: Vec<String> = update
                .remove_paths
                .iter()
                .map(|path| self.table.path(path))
                .collect();
            clauses.push(format!("REMOVE {}", paths.join(", ")));
        }
        for (keyword, actions) in [("ADD", &update.add_actions), ("DELETE", &update.delete_actions)] {
            if actions.is_empty() {
                continue;
            }
            let rendered: Vec<String> = actions
                .iter()
                .map(|action| {
                    let path = self.table.path(&action.path);
                    let value = self.table.value(action.value.clone());
                    format!("{path} {value}")
                })
                .collect();
            clauses.push(format!("{keyword} {}", rendered.join(", ")));
        }

        let rendered = (!clauses.is_empty()).then(|| clauses.join(" "));
        trace!(expression = ?rendered, "rendered update");
        rendered
    }

    /// Render a projection list; `None` when `paths` is empty.
    pub fn projection(&mut self, paths: &[AttributePath]) -> Option<String> {
        if paths.is_empty() {
            return None;
        }
        let rendered: Vec<String> = paths.iter().map(|path| self.table.path(path)).collect();
        Some(rendered.join(", "))
    }

    /// Consume the compiler, yielding the accumulated maps.
    #[must_use]
    pub fn finish(self) -> Placeholders {
        self.table.finish()
    }

    fn entries(&mut self, entries: &[GroupEntry]) -> Option<String> {
        let mut rendered = String::new();
        for entry in entries {
            let Some(fragment) = self.node(&entry.condition) else {
                continue;
            };
            if !rendered.is_empty() {
                rendered.push(' ');
                rendered.push_str(&entry.connector.to_string());
                rendered.push(' ');
            }
            rendered.push_str(&fragment);
        }
        (!rendered.is_empty()).then_some(rendered)
    }

    fn node(&mut self, condition: &Condition) -> Option<String> {
        let rendered = match condition {
            Condition::Compare { path, op, value } => {
                let path = self.table.path(path);
                let value = self.table.value(value.clone());
                format!("{path} {op} {value}")
            }
            Condition::AttributeFunction { path, function } => {
                format!("{function}({})", self.table.path(path))
            }
            Condition::AttributeType {
                path,
                attribute_type,
            } => {
                let path = self.table.path(path);
                let value = self
                    .table
                    .value(AttributeValue::S(attribute_type.as_str().to_owned()));
                format!("attribute_type({path}, {value})")
            }
            Condition::BeginsWith { path, prefix } => {
                let path = self.table.path(path);
                let value = self.table.value(prefix.clone());
                format!("begins_with({path}, {value})")
            }
            Condition::Contains { path, value } => {
                let path = self.table.path(path);
                let value = self.table.value(value.clone());
                format!("contains({path}, {value})")
            }
            Condition::Between { path, lower, upper } => {
                let path = self.table.path(path);
                let lower = self.table.value(lower.clone());
                let upper = self.table.value(upper.clone());
                format!("{path} BETWEEN {lower} AND {upper}")
            }
            // An empty candidate list has no valid rendering.
            Condition::In { values, .. } if values.is_empty() => return None,
            Condition::In { path, values } => {
                let path = self.table.path(path);
                let candidates: Vec<String> = values
                    .iter()
                    .map(|value| self.table.value(value.clone()))
                    .collect();
                format!("{path} IN ({})", candidates.join(", "))
            }
            Condition::SizeCompare { path, op, value } => {
                let path = self.table.path(path);
                let value = self.table.value(value.clone());
                format!("size({path}) {op} {value}")
            }
            Condition::Not(child) => {
                let inner = match child.as_ref() {
                    Condition::Group(entries) if entries.len() <= 1 => self.entries(entries),
                    other => self.node(other),
                }?;
                format!("NOT {inner}")
            }
            Condition::Group(entries) => format!("({})", self.entries(entries)?),
        };
        Some(rendered)
    }

    fn set_action(&mut self, action: &SetAction) -> String {
        let target = self.table.path(&action.path);
        match &action.value {
            SetValue::Literal(value) => {
                let value = self.table.value(value.clone());
                format!("{target} = {value}")
            }
            SetValue::Increment { source, amount } => {
                let source = self.table.path(source);
                let amount = self.table.value(amount.clone());
                format!("{target} = {source} + {amount}")
            }
            SetValue::Decrement { source, amount } => {
                let source = self.table.path(source);
                let amount = self.table.value(amount.clone());
                format!("{target} = {source} - {amount}")
            }
            SetValue::ListAppend { source, values } => {
                let source = self.table.path(source);
                let values = self.table.value(values.clone());
                format!("{target} = list_append({source}, {values})")
            }
            SetValue::IfNotExists { source, default } => {
                let source = self.table.path(source);
                let default = self.table.value(default.clone());
                format!("{target} = if_not_exists({source}, {default})")
            }
        }
    }
}
