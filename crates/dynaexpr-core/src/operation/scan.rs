//! `Scan` builder.

use dynaexpr_model::{Item, ScanInput, Select};
use tracing::debug;

use super::{Filtered, parse_paths};
use crate::error::{ExpressionError, ExpressionResult};
use crate::expression::{AttributePath, Compiler, ConditionBuilder, Placeholders};

/// Builds a `Scan` request.
#[derive(Debug, Clone)]
pub struct Scan {
    table_name: String,
    index_name: Option<String>,
    filters: ConditionBuilder,
    projection: Vec<AttributePath>,
    limit: Option<i32>,
    segment: Option<(i32, i32)>,
    consistent_read: Option<bool>,
    select: Option<Select>,
    exclusive_start_key: Item,
}

impl Scan {
    /// A full scan of `table_name`.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            index_name: None,
            filters: ConditionBuilder::new(),
            projection: Vec::new(),
            limit: None,
            segment: None,
            consistent_read: None,
            select: None,
            exclusive_start_key: Item::new(),
        }
    }

    /// Scan a secondary index instead of the base table.
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

    /// Scan only `segment` out of `total_segments` for a parallel scan.
    pub fn segment(mut self, segment: i32, total_segments: i32) -> ExpressionResult<Self> {
        if total_segments < 1 || !(0..total_segments).contains(&segment) {
            return Err(ExpressionError::malformed(
                "segment",
                format!("segment {segment} is outside 0..{total_segments}"),
            ));
        }
        self.segment = Some((segment, total_segments));
        Ok(self)
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

    /// Compile into a `ScanInput`.
    #[must_use]
    pub fn build(&self) -> ScanInput {
        let mut compiler = Compiler::new();
        let filter_expression = compiler.condition(&self.filters.build());
        let projection_expression = compiler.projection(&self.projection);
        let Placeholders { names, values } = compiler.finish();

        debug!(
            table = %self.table_name,
            index = ?self.index_name,
            names = names.len(),
            values = values.len(),
            segment = ?self.segment,
            "compiled scan"
        );

        ScanInput {
            table_name: self.table_name.clone(),
            index_name: self.index_name.clone(),
            filter_expression,
            projection_expression,
            expression_attribute_names: names,
            expression_attribute_values: values,
            limit: self.limit,
            exclusive_start_key: self.exclusive_start_key.clone(),
            segment: self.segment.map(|(segment, _)| segment),
            total_segments: self.segment.map(|(_, total)| total),
            select: self.select,
            consistent_read: self.consistent_read,
        }
    }
}

impl Filtered for Scan {
    fn filters(&self) -> &ConditionBuilder {
        &self.filters
    }

    fn with_filters(mut self, filters: ConditionBuilder) -> Self {
        self.filters = filters;
        self
    }
}
