//! `DeleteItem` builder.

use dynaexpr_model::{AttributeValue, Command, DeleteItemInput, Item, ReturnValue};

use super::Conditional;
use crate::error::{ExpressionError, ExpressionResult};
use crate::expression::{ConditionBuilder, OperationNode, compile};

/// Builds a `DeleteItem` request.
#[derive(Debug, Clone)]
pub struct DeleteItem {
    table_name: String,
    key: Item,
    conditions: ConditionBuilder,
    return_values: Option<ReturnValue>,
}

impl DeleteItem {
    /// A delete from `table_name` with no key yet.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            key: Item::new(),
            conditions: ConditionBuilder::new(),
            return_values: None,
        }
    }

    /// Add one primary key attribute.
    #[must_use]
    pub fn key(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.key.insert(name.into(), value.into());
        self
    }

    /// Attributes to return after the delete.
    #[must_use]
    pub fn return_values(mut self, return_values: ReturnValue) -> Self {
        self.return_values = Some(return_values);
        self
    }

    /// The operation AST as the compiler sees it.
    #[must_use]
    pub fn node(&self) -> OperationNode {
        OperationNode {
            key: self.key.clone(),
            condition: self.conditions.build(),
            return_values: self.return_values,
            ..OperationNode::new(self.table_name.clone())
        }
    }

    /// Compile into the generic command shape.
    #[must_use]
    pub fn command(&self) -> Command {
        compile(&self.node())
    }

    /// Compile into a `DeleteItemInput`.
    pub fn build(&self) -> ExpressionResult<DeleteItemInput> {
        if self.key.is_empty() {
            return Err(ExpressionError::MissingKey {
                operation: "DeleteItem",
            });
        }
        Ok(self.command().into())
    }
}

impl Conditional for DeleteItem {
    fn conditions(&self) -> &ConditionBuilder {
        &self.conditions
    }

    fn with_conditions(mut self, conditions: ConditionBuilder) -> Self {
        self.conditions = conditions;
        self
    }
}
