//! `Query` builder.

use dynaexpr_model::{AttributeValue, Item, QueryInput, Select};
use tracing::debug;

use super::{Filtered, parse_paths};
use crate::error::{ExpressionError, ExpressionResult};
use crate::expression::{
    Argument, AttributePath, CompareOp, Compiler, Condition, ConditionBuilder, Connector,
    Placeholders,
};

/// Operators a key condition may use.
const KEY_CONDITION_OPS: &[&str] = &["=", "<", "<=", ">", ">=", "between", "begins_with"];

/// Builds a `Query` request.
///
/// The key condition, filter and projection are rendered against one
/// placeholder table, in that order, so a path appearing in more than one of
/// them shares a single name alias.
#[derive(Debug, Clone)]
pub struct Query {
    table_name: String,
    index_name: Option<String>,
    key_condition: ConditionBuilder,
    filters: ConditionBuilder,
    projection: Vec<AttributePath>,
    limit: Option<i32>,
    scan_index_forward: Option<bool>,
    consistent_read: Option<bool>,
    select: Option<Select>,
    exclusive_start_key: Item,
}

impl Query {
    /// A query against `table_name`.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            index_name: None,
            key_condition: ConditionBuilder::new(),
            filters: ConditionBuilder::new(),
            projection: Vec::new(),
            limit: None,
            scan_index_forward: None,
            consistent_read: None,
            select: None,
            exclusive_start_key: Item::new(),
        }
    }

    /// Append a key condition, joined with AND.
    ///
    /// Only equality, ordering, `between` and `begins_with` are valid on key
    /// attributes; any other operator is rejected.
    pub fn key_condition(
        mut self,
        path: &str,
        op: &str,
        argument: impl Into<Argument>,
    ) -> ExpressionResult<Self> {
        if !KEY_CONDITION_OPS.contains(&op) {
            return Err(ExpressionError::malformed(
                op,
                "not allowed in a key condition",
            ));
        }
        self.key_condition = self.key_condition.expression(path, op, argument)?;
        Ok(self)
    }

    /// Replace the key condition with a prebuilt tree.
    ///
    /// The tree may only contain AND-joined comparisons (other than `<>`),
    /// `BETWEEN` and `begins_with`.
    pub fn with_key_condition(mut self, condition: Condition) -> ExpressionResult<Self> {
        check_key_condition(&condition)?;
        self.key_condition = ConditionBuilder::from_condition(condition);
        Ok(self)
    }

    /// Query a secondary index instead of the base table.
    #[must_use]
    pub fn index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    /// Restrict the returned attributes. Appends to any earlier projection.
    pub fn projection(mut self, paths: &[&str]) -> ExpressionResult<Self> {
        self.projection.extend(parse_paths(paths)?);
        Ok(self)
    }

    /// Maximum number of items to evaluate.
    #[must_use]
    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// `false` to traverse the index in descending order.
    #[must_use]
    pub fn scan_index_forward(mut self, forward: bool) -> Self {
        self.scan_index_forward = Some(forward);
        self
    }

    /// Request a strongly consistent read.
    #[must_use]
    pub fn consistent_read(mut self, consistent: bool) -> Self {
        self.consistent_read = Some(consistent);
        self
    }

    /// Which attributes the result carries.
    #[must_use]
    pub fn select(mut self, select: Select) -> Self {
        self.select = Some(select);
        self
    }

    /// Resume after the item with this primary key.
    #[must_use]
    pub fn exclusive_start_key(mut self, key: Item) -> Self {
        self.exclusive_start_key = key;
        self
    }

    /// Add one attribute of the resume key.
    #[must_use]
    pub fn start_key(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.exclusive_start_key.insert(name.into(), value.into());
        self
    }

    /// Compile into a `QueryInput`.
    ///
    /// Fails with [`ExpressionError::MissingKeyCondition`] when the key
    /// condition renders to nothing, including a tree of empty groups.
    pub fn build(&self) -> ExpressionResult<QueryInput> {
        let mut compiler = Compiler::new();
        let key_condition_expression = compiler
            .condition(&self.key_condition.build())
            .ok_or(ExpressionError::MissingKeyCondition)?;
        let filter_expression = compiler.condition(&self.filters.build());
        let projection_expression = compiler.projection(&self.projection);
        let Placeholders { names, values } = compiler.finish();

        debug!(
            table = %self.table_name,
            index = ?self.index_name,
            names = names.len(),
            values = values.len(),
            has_filter = filter_expression.is_some(),
            "compiled query"
        );

        Ok(QueryInput {
            table_name: self.table_name.clone(),
            index_name: self.index_name.clone(),
            key_condition_expression: Some(key_condition_expression),
            filter_expression,
            projection_expression,
            expression_attribute_names: names,
            expression_attribute_values: values,
            scan_index_forward: self.scan_index_forward,
            limit: self.limit,
            exclusive_start_key: self.exclusive_start_key.clone(),
            select: self.select,
            consistent_read: self.consistent_read,
        })
    }
}

impl Filtered for Query {
    fn filters(&self) -> &ConditionBuilder {
        &self.filters
    }

    fn with_filters(mut self, filters: ConditionBuilder) -> Self {
        self.filters = filters;
        self
    }
}

fn check_key_condition(condition: &Condition) -> ExpressionResult<()> {
    match condition {
        Condition::Compare { op, .. } if *op != CompareOp::Ne => Ok(()),
        Condition::Between { .. } | Condition::BeginsWith { .. } => Ok(()),
        Condition::Group(entries) => {
            if entries
                .iter()
                .skip(1)
                .any(|entry| entry.connector == Connector::Or)
            {
                return Err(ExpressionError::malformed(
                    "key_condition",
                    "key conditions may only be joined with AND",
                ));
            }
            entries
                .iter()
                .try_for_each(|entry| check_key_condition(&entry.condition))
        }
        _ => Err(ExpressionError::malformed(
            "key_condition",
            "only comparisons, BETWEEN and begins_with are allowed",
        )),
    }
}
