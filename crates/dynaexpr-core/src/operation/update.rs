//! `UpdateItem` builder.

use dynaexpr_model::{AttributeValue, Command, Item, ReturnValue, UpdateItemInput};

use super::Conditional;
use crate::error::{ExpressionError, ExpressionResult};
use crate::expression::{
    AttributePath, ConditionBuilder, OperationNode, SetValue, UpdateBuilder, compile,
};

/// Builds an `UpdateItem` request.
///
/// ```
/// use dynaexpr_core::operation::{Conditional, UpdateItem};
///
/// let input = UpdateItem::new("counters")
///     .key("id", "page-1")
///     .set_expression("count", "+", 1)?
///     .remove("temp")?
///     .condition_attribute("id", "attribute_exists")?
///     .build()?;
/// assert_eq!(input.update_expression.as_deref(), Some("SET #n1 = #n1 + :v0 REMOVE #n2"));
/// assert_eq!(input.condition_expression.as_deref(), Some("attribute_exists(#n0)"));
/// # Ok::<(), dynaexpr_core::ExpressionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct UpdateItem {
    table_name: String,
    key: Item,
    conditions: ConditionBuilder,
    update: UpdateBuilder,
    return_values: Option<ReturnValue>,
}

impl UpdateItem {
    /// An update against `table_name` with no key or actions yet.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            key: Item::new(),
            conditions: ConditionBuilder::new(),
            update: UpdateBuilder::new(),
            return_values: None,
        }
    }

    /// Add one primary key attribute.
    #[must_use]
    pub fn key(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.key.insert(name.into(), value.into());
        self
    }

    /// `SET path = value`.
    pub fn set(self, path: &str, value: impl Into<AttributeValue>) -> ExpressionResult<Self> {
        let update = self.update.set(path, value)?;
        Ok(self.with_update(update))
    }

    /// `SET path = path <op> value`; see [`UpdateBuilder::set_expression`].
    pub fn set_expression(
        self,
        path: &str,
        op: &str,
        value: impl Into<AttributeValue>,
    ) -> ExpressionResult<Self> {
        let update = self.update.set_expression(path, op, value)?;
        Ok(self.with_update(update))
    }

    /// `SET path = <value>` with a typed [`SetValue`].
    pub fn set_with(self, path: AttributePath, value: SetValue) -> ExpressionResult<Self> {
        let update = self.update.set_with(path, value)?;
        Ok(self.with_update(update))
    }

    /// `REMOVE path`.
    pub fn remove(self, path: &str) -> ExpressionResult<Self> {
        let update = self.update.remove(path)?;
        Ok(self.with_update(update))
    }

    /// `ADD path value`.
    pub fn add(self, path: &str, value: impl Into<AttributeValue>) -> ExpressionResult<Self> {
        let update = self.update.add(path, value)?;
        Ok(self.with_update(update))
    }

    /// `DELETE path value`.
    pub fn delete(self, path: &str, value: impl Into<AttributeValue>) -> ExpressionResult<Self> {
        let update = self.update.delete(path, value)?;
        Ok(self.with_update(update))
    }

    /// Replace all update actions.
    #[must_use]
    pub fn with_update(mut self, update: UpdateBuilder) -> Self {
        self.update = update;
        self
    }

    /// Attributes to return after the update.
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
            update: self.update.build(),
            return_values: self.return_values,
            ..OperationNode::new(self.table_name.clone())
        }
    }

    /// Compile into the generic command shape.
    #[must_use]
    pub fn command(&self) -> Command {
        compile(&self.node())
    }

    /// Compile into an `UpdateItemInput`.
    pub fn build(&self) -> ExpressionResult<UpdateItemInput> {
        if self.key.is_empty() {
            return Err(ExpressionError::MissingKey {
                operation: "UpdateItem",
            });
        }
        Ok(self.command().into())
    }
}

impl Conditional for UpdateItem {
    fn conditions(&self) -> &ConditionBuilder {
        &self.conditions
    }

    fn with_conditions(mut self, conditions: ConditionBuilder) -> Self {
        self.conditions = conditions;
        self
    }
}
