//! `PutItem` builder.

use dynaexpr_model::{AttributeValue, Command, Item, PutItemInput, ReturnValue};

use super::Conditional;
use crate::error::{ExpressionError, ExpressionResult};
use crate::expression::{ConditionBuilder, OperationNode, compile};

/// Builds a `PutItem` request. The item payload is passed through verbatim.
#[derive(Debug, Clone)]
pub struct PutItem {
    table_name: String,
    item: Item,
    conditions: ConditionBuilder,
    return_values: Option<ReturnValue>,
}

impl PutItem {
    /// A put into `table_name` with an empty item.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            item: Item::new(),
            conditions: ConditionBuilder::new(),
            return_values: None,
        }
    }

    /// Replace the whole item payload.
    #[must_use]
    pub fn item(mut self, item: Item) -> Self {
        self.item = item;
        self
    }

    /// Set one attribute of the item payload.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.item.insert(name.into(), value.into());
        self
    }

    /// Attributes to return after the put.
    #[must_use]
    pub fn return_values(mut self, return_values: ReturnValue) -> Self {
        self.return_values = Some(return_values);
        self
    }

    /// The operation AST as the compiler sees it.
    #[must_use]
    pub fn node(&self) -> OperationNode {
        OperationNode {
            item: self.item.clone(),
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

    /// Compile into a `PutItemInput`.
    pub fn build(&self) -> ExpressionResult<PutItemInput> {
        if self.item.is_empty() {
            return Err(ExpressionError::MissingItem);
        }
        Ok(self.command().into())
    }
}

impl Conditional for PutItem {
    fn conditions(&self) -> &ConditionBuilder {
        &self.conditions
    }

    fn with_conditions(mut self, conditions: ConditionBuilder) -> Self {
        self.conditions = conditions;
        self
    }
}
