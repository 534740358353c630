//! Per-operation request builders.
//!
//! Each builder holds the pieces of one request (table, key or item,
//! expression builders, selectors) and turns them into the typed input of
//! `dynaexpr-model` on [`build`](UpdateItem::build). Nothing here talks to
//! the network: the built input is handed to whatever transport the caller
//! uses.
//!
//! Builders are plain values. They do not implement `Future` or
//! `IntoFuture`, so awaiting one instead of sending its built input is a
//! compile error rather than a runtime surprise:
//!
//! ```compile_fail
//! use dynaexpr_core::operation::UpdateItem;
//!
//! async fn send(update: UpdateItem) {
//!     let _ = update.await;
//! }
//! ```
//!
//! Builder methods consume `self`; clone a partially configured builder to
//! reuse it as a template.

mod delete;
mod get;
mod put;
mod query;
mod scan;
mod update;

pub use delete::DeleteItem;
pub use get::GetItem;
pub use put::PutItem;
pub use query::Query;
pub use scan::Scan;
pub use update::UpdateItem;

use crate::error::ExpressionResult;
use crate::expression::{Argument, AttributePath, Condition, ConditionBuilder};

/// Operations gated by a `ConditionExpression`.
pub trait Conditional: Sized {
    /// The condition accumulated so far.
    fn conditions(&self) -> &ConditionBuilder;

    /// Replace the accumulated condition.
    #[must_use]
    fn with_conditions(self, conditions: ConditionBuilder) -> Self;

    /// Append `(path, op, argument)` to the condition, joined with AND.
    fn condition_expression(
        self,
        path: &str,
        op: &str,
        argument: impl Into<Argument>,
    ) -> ExpressionResult<Self> {
        let next = self.conditions().expression(path, op, argument)?;
        Ok(self.with_conditions(next))
    }

    /// Append `(path, op, argument)` to the condition, joined with OR.
    fn or_condition_expression(
        self,
        path: &str,
        op: &str,
        argument: impl Into<Argument>,
    ) -> ExpressionResult<Self> {
        let next = self.conditions().or_expression(path, op, argument)?;
        Ok(self.with_conditions(next))
    }

    /// Append `function(path)` to the condition, joined with AND.
    fn condition_attribute(self, path: &str, function: &str) -> ExpressionResult<Self> {
        let next = self.conditions().attribute(path, function)?;
        Ok(self.with_conditions(next))
    }

    /// Append a parenthesized sub-condition, joined with AND.
    fn condition_group<F>(self, build: F) -> ExpressionResult<Self>
    where
        F: FnOnce(ConditionBuilder) -> ExpressionResult<ConditionBuilder>,
    {
        let next = self.conditions().group(build)?;
        Ok(self.with_conditions(next))
    }

    /// Append a parenthesized sub-condition, joined with OR.
    fn or_condition_group<F>(self, build: F) -> ExpressionResult<Self>
    where
        F: FnOnce(ConditionBuilder) -> ExpressionResult<ConditionBuilder>,
    {
        let next = self.conditions().or_group(build)?;
        Ok(self.with_conditions(next))
    }

    /// Append a prebuilt condition node, joined with AND.
    #[must_use]
    fn condition(self, condition: Condition) -> Self {
        let next = self.conditions().and(condition);
        self.with_conditions(next)
    }
}

/// Read operations narrowed by a `FilterExpression`.
pub trait Filtered: Sized {
    /// The filter accumulated so far.
    fn filters(&self) -> &ConditionBuilder;

    /// Replace the accumulated filter.
    #[must_use]
    fn with_filters(self, filters: ConditionBuilder) -> Self;

    /// Append `(path, op, argument)` to the filter, joined with AND.
    fn filter_expression(
        self,
        path: &str,
        op: &str,
        argument: impl Into<Argument>,
    ) -> ExpressionResult<Self> {
        let next = self.filters().expression(path, op, argument)?;
        Ok(self.with_filters(next))
    }

    /// Append `(path, op, argument)` to the filter, joined with OR.
    fn or_filter_expression(
        self,
        path: &str,
        op: &str,
        argument: impl Into<Argument>,
    ) -> ExpressionResult<Self> {
        let next = self.filters().or_expression(path, op, argument)?;
        Ok(self.with_filters(next))
    }

    /// Append a parenthesized sub-filter, joined with AND.
    fn filter_group<F>(self, build: F) -> ExpressionResult<Self>
    where
        F: FnOnce(ConditionBuilder) -> ExpressionResult<ConditionBuilder>,
    {
        let next = self.filters().group(build)?;
        Ok(self.with_filters(next))
    }

    /// Append a prebuilt filter node, joined with AND.
    #[must_use]
    fn filter(self, condition: Condition) -> Self {
        let next = self.filters().and(condition);
        self.with_filters(next)
    }
}

fn parse_paths(paths: &[&str]) -> ExpressionResult<Vec<AttributePath>> {
    paths.iter().map(|p| AttributePath::parse(p)).collect()
}
