//! Immutable, chainable builders for condition and update ASTs.
//!
//! Builders never mutate in place: every call borrows the receiver and
//! returns a new builder wrapping an extended tree, so a partially built
//! value can serve as a template for several requests.
//!
//! ```
//! use dynaexpr_core::expression::ConditionBuilder;
//!
//! let base = ConditionBuilder::new().expression("status", "=", "active")?;
//! let adults = base.expression("age", ">=", 18)?;
//! let vip = base.or_group(|g| g.expression("tier", "=", "gold")?.or_expression("spend", ">", 1000))?;
//! assert_eq!(base.len(), 1);
//! assert_eq!(adults.len(), 2);
//! assert_eq!(vip.len(), 2);
//! # Ok::<(), dynaexpr_core::ExpressionError>(())
//! ```

use dynaexpr_model::AttributeValue;

use super::ast::{
    AttributeFunction, AttributePath, AttributeType, CompareOp, Condition, Connector, GroupEntry,
    SetAction, SetValue, UpdateNode, ValueAction,
};
use crate::error::{ExpressionError, ExpressionResult};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Right-hand side of a string-dispatched builder call.
///
/// Which variant an operator accepts:
///
/// | operator | argument |
/// |----------|----------|
/// | `=` `<>` `<` `<=` `>` `>=` | `Value` |
/// | `begins_with`, `contains` | `Value` |
/// | `attribute_type` | `Value` holding a type descriptor string |
/// | `between` | `Range` |
/// | `in` | `List` (non-empty) |
/// | `attribute_exists`, `attribute_not_exists` | `None` |
/// | `size` | `Nested` with a comparator and a `Value` |
/// | `not` | `Nested` with any operator above |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// No argument (unary functions).
    None,
    /// A single literal.
    Value(AttributeValue),
    /// Inclusive lower and upper bound.
    Range(AttributeValue, AttributeValue),
    /// Candidate list.
    List(Vec<AttributeValue>),
    /// Another operator applied to the same path.
    Nested(String, Box<Argument>),
}

impl Argument {
    /// Apply `op` with `argument` to the same path, for `not` and `size`.
    #[must_use]
    pub fn nested(op: impl Into<String>, argument: impl Into<Argument>) -> Self {
        Self::Nested(op.into(), Box::new(argument.into()))
    }

    fn shape(&self) -> &'static str {
        match self {
            Self::None => "no argument",
            Self::Value(_) => "a single value",
            Self::Range(..) => "a range",
            Self::List(_) => "a list",
            Self::Nested(..) => "a nested operator",
        }
    }
}

impl From<()> for Argument {
    fn from((): ()) -> Self {
        Self::None
    }
}

impl From<AttributeValue> for Argument {
    fn from(value: AttributeValue) -> Self {
        Self::Value(value)
    }
}

macro_rules! impl_argument_from_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Argument {
                fn from(value: $ty) -> Self {
                    Self::Value(value.into())
                }
            }
        )*
    };
}

impl_argument_from_literal!(
    &str, String, bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64
);

impl<L: Into<AttributeValue>, U: Into<AttributeValue>> From<(L, U)> for Argument {
    fn from((lower, upper): (L, U)) -> Self {
        Self::Range(lower.into(), upper.into())
    }
}

impl<V: Into<AttributeValue>> From<Vec<V>> for Argument {
    fn from(values: Vec<V>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Turn a `(path, op, argument)` call into a condition node.
fn shape_condition(
    path: AttributePath,
    op: &str,
    argument: Argument,
) -> ExpressionResult<Condition> {
    if let Some(cmp) = CompareOp::from_symbol(op) {
        return match argument {
            Argument::Value(value) => Ok(Condition::compare(path, cmp, value)),
            other => Err(mismatch(op, "a single value", &other)),
        };
    }
    if let Some(function) = AttributeFunction::from_name(op) {
        return match argument {
            Argument::None => Ok(Condition::AttributeFunction { path, function }),
            other => Err(mismatch(op, "no argument", &other)),
        };
    }

    match (op, argument) {
        ("begins_with", Argument::Value(prefix)) => Ok(Condition::begins_with(path, prefix)),
        ("contains", Argument::Value(value)) => Ok(Condition::contains(path, value)),
        ("between", Argument::Range(lower, upper)) => Ok(Condition::between(path, lower, upper)),
        ("in", Argument::List(values)) => {
            if values.is_empty() {
                return Err(ExpressionError::malformed(op, "expected at least one value"));
            }
            Ok(Condition::In { path, values })
        }
        ("attribute_type", Argument::Value(AttributeValue::S(descriptor))) => {
            AttributeType::from_descriptor(&descriptor)
                .map(|attribute_type| Condition::attribute_type(path, attribute_type))
                .ok_or_else(|| {
                    ExpressionError::malformed(op, format!("unknown type descriptor {descriptor}"))
                })
        }
        ("size", Argument::Nested(inner, argument)) => {
            match (CompareOp::from_symbol(&inner), *argument) {
                (Some(cmp), Argument::Value(value)) => Ok(Condition::size(path, cmp, value)),
                (None, _) => Err(ExpressionError::malformed(
                    op,
                    format!("expected a comparator, got '{inner}'"),
                )),
                (Some(_), other) => Err(mismatch(op, "a single value", &other)),
            }
        }
        ("not", Argument::Nested(inner, argument)) => {
            shape_condition(path, &inner, *argument).map(Condition::negate)
        }
        ("begins_with" | "contains", other) => Err(mismatch(op, "a single value", &other)),
        ("attribute_type", other) => Err(mismatch(op, "a type descriptor string", &other)),
        ("between", other) => Err(mismatch(op, "a range", &other)),
        ("in", other) => Err(mismatch(op, "a list", &other)),
        ("size" | "not", other) => Err(mismatch(op, "a nested operator", &other)),
        (unknown, _) => Err(ExpressionError::malformed(unknown, "unknown operator")),
    }
}

fn mismatch(op: &str, expected: &str, got: &Argument) -> ExpressionError {
    ExpressionError::malformed(op, format!("expected {expected}, got {}", got.shape()))
}

// ---------------------------------------------------------------------------
// Condition builder
// ---------------------------------------------------------------------------

/// Accumulates a top-level [`Condition::Group`].
///
/// `expression` and `and` join with AND, the `or_` variants with OR. The
/// first entry's connector is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionBuilder {
    entries: Vec<GroupEntry>,
}

impl ConditionBuilder {
    /// An empty builder scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing condition. A group contributes its entries,
    /// any other node becomes the single entry.
    #[must_use]
    pub fn from_condition(condition: Condition) -> Self {
        match condition {
            Condition::Group(entries) => Self { entries },
            other => Self::new().and(other),
        }
    }

    /// Append `(path, op, argument)` joined with AND.
    pub fn expression(
        &self,
        path: &str,
        op: &str,
        argument: impl Into<Argument>,
    ) -> ExpressionResult<Self> {
        self.shaped(Connector::And, path, op, argument.into())
    }

    /// Append `(path, op, argument)` joined with OR.
    pub fn or_expression(
        &self,
        path: &str,
        op: &str,
        argument: impl Into<Argument>,
    ) -> ExpressionResult<Self> {
        self.shaped(Connector::Or, path, op, argument.into())
    }

    /// Append `function(path)` joined with AND.
    pub fn attribute(&self, path: &str, function: &str) -> ExpressionResult<Self> {
        self.function(Connector::And, path, function)
    }

    /// Append `function(path)` joined with OR.
    pub fn or_attribute(&self, path: &str, function: &str) -> ExpressionResult<Self> {
        self.function(Connector::Or, path, function)
    }

    /// Append a parenthesized sub-expression joined with AND.
    ///
    /// `build` receives a fresh, empty scope.
    pub fn group<F>(&self, build: F) -> ExpressionResult<Self>
    where
        F: FnOnce(ConditionBuilder) -> ExpressionResult<ConditionBuilder>,
    {
        let nested = build(Self::new())?;
        Ok(self.push(Connector::And, nested.into_condition()))
    }

    /// Append a parenthesized sub-expression joined with OR.
    pub fn or_group<F>(&self, build: F) -> ExpressionResult<Self>
    where
        F: FnOnce(ConditionBuilder) -> ExpressionResult<ConditionBuilder>,
    {
        let nested = build(Self::new())?;
        Ok(self.push(Connector::Or, nested.into_condition()))
    }

    /// Append a prebuilt node joined with AND.
    #[must_use]
    pub fn and(&self, condition: Condition) -> Self {
        self.push(Connector::And, condition)
    }

    /// Append a prebuilt node joined with OR.
    #[must_use]
    pub fn or(&self, condition: Condition) -> Self {
        self.push(Connector::Or, condition)
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The accumulated tree.
    #[must_use]
    pub fn build(&self) -> Condition {
        Condition::Group(self.entries.clone())
    }

    /// The accumulated tree, consuming the builder.
    #[must_use]
    pub fn into_condition(self) -> Condition {
        Condition::Group(self.entries)
    }

    fn shaped(
        &self,
        connector: Connector,
        path: &str,
        op: &str,
        argument: Argument,
    ) -> ExpressionResult<Self> {
        let path = AttributePath::parse(path)?;
        let condition = shape_condition(path, op, argument)?;
        Ok(self.push(connector, condition))
    }

    fn function(&self, connector: Connector, path: &str, function: &str) -> ExpressionResult<Self> {
        if AttributeFunction::from_name(function).is_none() {
            return Err(ExpressionError::malformed(
                function,
                "unknown attribute function",
            ));
        }
        self.shaped(connector, path, function, Argument::None)
    }

    fn push(&self, connector: Connector, condition: Condition) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        entries.push(GroupEntry {
            connector,
            condition,
        });
        Self { entries }
    }
}

// ---------------------------------------------------------------------------
// Update builder
// ---------------------------------------------------------------------------

/// Accumulates an [`UpdateNode`].
///
/// A path may be targeted by at most one action across all clauses; a second
/// action on the same path fails with
/// [`ExpressionError::ConflictingUpdateTarget`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateBuilder {
    node: UpdateNode,
}

impl UpdateBuilder {
    /// An empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate an existing node by replaying its actions.
    pub fn from_node(node: UpdateNode) -> ExpressionResult<Self> {
        let mut builder = Self::new();
        for action in node.set_actions {
            builder = builder.set_with(action.path, action.value)?;
        }
        for path in node.remove_paths {
            builder = builder.remove_path(path)?;
        }
        for action in node.add_actions {
            builder = builder.add_path(action.path, action.value)?;
        }
        for action in node.delete_actions {
            builder = builder.delete_path(action.path, action.value)?;
        }
        Ok(builder)
    }

    /// `SET path = value`.
    pub fn set(&self, path: &str, value: impl Into<AttributeValue>) -> ExpressionResult<Self> {
        self.set_with(
            AttributePath::parse(path)?,
            SetValue::Literal(value.into()),
        )
    }

    /// `SET path = path <op> value` where `op` is `+`, `-`, `list_append` or
    /// `if_not_exists`.
    pub fn set_expression(
        &self,
        path: &str,
        op: &str,
        value: impl Into<AttributeValue>,
    ) -> ExpressionResult<Self> {
        let path = AttributePath::parse(path)?;
        let source = path.clone();
        let value = value.into();
        let set_value = match op {
            "+" => SetValue::Increment {
                source,
                amount: value,
            },
            "-" => SetValue::Decrement {
                source,
                amount: value,
            },
            "list_append" => SetValue::ListAppend {
                source,
                values: value,
            },
            "if_not_exists" => SetValue::IfNotExists {
                source,
                default: value,
            },
            other => {
                return Err(ExpressionError::malformed(
                    other,
                    "expected '+', '-', 'list_append' or 'if_not_exists'",
                ));
            }
        };
        self.set_with(path, set_value)
    }

    /// `SET path = <value>` with any [`SetValue`], including ones reading a
    /// different source path.
    pub fn set_with(&self, path: AttributePath, value: SetValue) -> ExpressionResult<Self> {
        match &value {
            SetValue::Increment { amount, .. } | SetValue::Decrement { amount, .. }
                if !amount.is_n() =>
            {
                return Err(ExpressionError::malformed(
                    "SET",
                    format!("arithmetic operand must be a number, got {}", amount.type_descriptor()),
                ));
            }
            SetValue::ListAppend { values, .. } if !values.is_l() => {
                return Err(ExpressionError::malformed(
                    "list_append",
                    format!("operand must be a list, got {}", values.type_descriptor()),
                ));
            }
            _ => {}
        }
        self.check_target(&path)?;
        let mut node = self.node.clone();
        node.set_actions.push(SetAction { path, value });
        Ok(Self { node })
    }

    /// `REMOVE path`.
    pub fn remove(&self, path: &str) -> ExpressionResult<Self> {
        self.remove_path(AttributePath::parse(path)?)
    }

    /// `ADD path value`; value must be a number or a set.
    pub fn add(&self, path: &str, value: impl Into<AttributeValue>) -> ExpressionResult<Self> {
        self.add_path(AttributePath::parse(path)?, value.into())
    }

    /// `DELETE path value`; value must be a set.
    pub fn delete(&self, path: &str, value: impl Into<AttributeValue>) -> ExpressionResult<Self> {
        self.delete_path(AttributePath::parse(path)?, value.into())
    }

    /// Returns `true` when no action has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node.is_empty()
    }

    /// The accumulated update node.
    #[must_use]
    pub fn build(&self) -> UpdateNode {
        self.node.clone()
    }

    /// The accumulated update node, consuming the builder.
    #[must_use]
    pub fn into_node(self) -> UpdateNode {
        self.node
    }

    fn remove_path(&self, path: AttributePath) -> ExpressionResult<Self> {
        self.check_target(&path)?;
        let mut node = self.node.clone();
        node.remove_paths.push(path);
        Ok(Self { node })
    }

    fn add_path(&self, path: AttributePath, value: AttributeValue) -> ExpressionResult<Self> {
        if !matches!(
            value,
            AttributeValue::N(_) | AttributeValue::Ns(_) | AttributeValue::Ss(_) | AttributeValue::Bs(_)
        ) {
            return Err(ExpressionError::malformed(
                "ADD",
                format!("operand must be a number or a set, got {}", value.type_descriptor()),
            ));
        }
        self.check_target(&path)?;
        let mut node = self.node.clone();
        node.add_actions.push(ValueAction { path, value });
        Ok(Self { node })
    }

    fn delete_path(&self, path: AttributePath, value: AttributeValue) -> ExpressionResult<Self> {
        if !matches!(
            value,
            AttributeValue::Ns(_) | AttributeValue::Ss(_) | AttributeValue::Bs(_)
        ) {
            return Err(ExpressionError::malformed(
                "DELETE",
                format!("operand must be a set, got {}", value.type_descriptor()),
            ));
        }
        self.check_target(&path)?;
        let mut node = self.node.clone();
        node.delete_actions.push(ValueAction { path, value });
        Ok(Self { node })
    }

    fn check_target(&self, path: &AttributePath) -> ExpressionResult<()> {
        match self.node.targets().find(|(_, existing)| *existing == path) {
            Some((keyword, _)) => Err(ExpressionError::ConflictingUpdateTarget {
                path: path.to_string(),
                existing: keyword,
            }),
            None => Ok(()),
        }
    }
}
