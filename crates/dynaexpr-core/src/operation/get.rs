//! `GetItem` builder.

use dynaexpr_model::{AttributeValue, GetItemInput, Item};

use super::parse_paths;
use crate::error::{ExpressionError, ExpressionResult};
use crate::expression::{AttributePath, Compiler, Placeholders};

/// Builds a `GetItem` request. Only the projection carries placeholders, so
/// the built input has names but never values.
#[derive(Debug, Clone)]
pub struct GetItem {
    table_name: String,
    key: Item,
    projection: Vec<AttributePath>,
    consistent_read: Option<bool>,
}

impl GetItem {
    /// A read from `table_name` with no key yet.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            key: Item::new(),
            projection: Vec::new(),
            consistent_read: None,
        }
    }

    /// Add one primary key attribute.
    #[must_use]
    pub fn key(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.key.insert(name.into(), value.into());
        self
    }

    /// Restrict the returned attributes. Appends to any earlier projection.
    pub fn projection(mut self, paths: &[&str]) -> ExpressionResult<Self> {
        self.projection.extend(parse_paths(paths)?);
        Ok(self)
    }

    /// Request a strongly consistent read.
    #[must_use]
    pub fn consistent_read(mut self, consistent: bool) -> Self {
        self.consistent_read = Some(consistent);
        self
    }

    /// Compile into a `GetItemInput`.
    pub fn build(&self) -> ExpressionResult<GetItemInput> {
        if self.key.is_empty() {
            return Err(ExpressionError::MissingKey {
                operation: "GetItem",
            });
        }
        let mut compiler = Compiler::new();
        let projection_expression = compiler.projection(&self.projection);
        let Placeholders { names, .. } = compiler.finish();
        Ok(GetItemInput {
            table_name: self.table_name.clone(),
            key: self.key.clone(),
            consistent_read: self.consistent_read,
            projection_expression,
            expression_attribute_names: names,
        })
    }
}
