//! AST types for condition and update expressions.
//!
//! This module defines the vocabulary the builder assembles and the compiler
//! renders. Every node is plain immutable data compared structurally; the
//! types carry no rendering behavior of their own.
//!
//! Nodes are `serde` (de)serializable so that an operation description can be
//! read from JSON (see the `dynaexpr-compile` binary).

use std::fmt;
use std::str::FromStr;

use dynaexpr_model::{AttributeValue, Item, ReturnValue};
use serde::{Deserialize, Serialize};

use crate::error::{ExpressionError, ExpressionResult};

// ---------------------------------------------------------------------------
// Attribute paths
// ---------------------------------------------------------------------------

/// A document path consisting of one or more elements, e.g. `info.tags[0]`.
///
/// Serialized as the dotted string when that form parses back to the same
/// elements, otherwise as an element array such as `["a.b", 0]`. Both forms
/// are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PathRepr", into = "PathRepr")]
pub struct AttributePath {
    /// The path elements in order. The first element is always an attribute.
    pub elements: Vec<PathElement>,
}

/// A single element in an attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathElement {
    /// A named attribute segment.
    Attribute(String),
    /// A list index dereference (e.g., `[0]`).
    Index(usize),
}

impl AttributePath {
    /// A top-level attribute taken verbatim, without splitting on `.` or `[`.
    ///
    /// Use this for attribute names that contain path punctuation. The name
    /// must not be empty.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "attribute name must not be empty");
        Self {
            elements: vec![PathElement::Attribute(name)],
        }
    }

    /// Parse the dotted/bracketed form, e.g. `info.ratings[2].score`.
    pub fn parse(input: &str) -> ExpressionResult<Self> {
        if input.is_empty() {
            return Err(ExpressionError::invalid_path(input, "path is empty"));
        }

        let mut elements = Vec::new();
        for segment in input.split('.') {
            let (name, mut rest) = match segment.find('[') {
                Some(pos) => segment.split_at(pos),
                None => (segment, ""),
            };
            if name.is_empty() {
                let message = if segment.is_empty() {
                    "empty path segment"
                } else {
                    "list index must follow an attribute name"
                };
                return Err(ExpressionError::invalid_path(input, message));
            }
            elements.push(PathElement::Attribute(name.to_owned()));

            while !rest.is_empty() {
                let Some(close) = rest.find(']') else {
                    return Err(ExpressionError::invalid_path(input, "unterminated '['"));
                };
                let index = rest
                    .get(1..close)
                    .filter(|digits| rest.starts_with('[') && !digits.is_empty())
                    .and_then(|digits| digits.parse::<usize>().ok())
                    .ok_or_else(|| {
                        ExpressionError::invalid_path(input, "list index must be a number")
                    })?;
                elements.push(PathElement::Index(index));
                rest = &rest[close + 1..];
            }
        }

        Ok(Self { elements })
    }

    /// Append a nested attribute segment, taken verbatim. The name must not
    /// be empty.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "attribute name must not be empty");
        self.elements.push(PathElement::Attribute(name));
        self
    }

    /// Append a list index.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.elements.push(PathElement::Index(index));
        self
    }

    /// Build a path from explicit elements.
    ///
    /// The first element must be an attribute and no attribute name may be
    /// empty.
    pub fn from_elements(elements: Vec<PathElement>) -> ExpressionResult<Self> {
        let path = Self { elements };
        match path.elements.first() {
            None => Err(ExpressionError::invalid_path("", "path is empty")),
            Some(PathElement::Index(_)) => Err(ExpressionError::invalid_path(
                path.to_string(),
                "list index must follow an attribute name",
            )),
            Some(PathElement::Attribute(_)) => {
                let has_empty_name = path
                    .elements
                    .iter()
                    .any(|elem| matches!(elem, PathElement::Attribute(name) if name.is_empty()));
                if has_empty_name {
                    return Err(ExpressionError::invalid_path(
                        path.to_string(),
                        "empty path segment",
                    ));
                }
                Ok(path)
            }
        }
    }

    /// Whether `Display` output parses back to these exact elements.
    fn is_plain(&self) -> bool {
        self.elements.iter().all(|elem| match elem {
            PathElement::Attribute(name) => {
                !name.is_empty() && !name.contains(['.', '[', ']'])
            }
            PathElement::Index(_) => true,
        })
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, elem) in self.elements.iter().enumerate() {
            match elem {
                PathElement::Attribute(name) if i > 0 => write!(f, ".{name}")?,
                PathElement::Attribute(name) => write!(f, "{name}")?,
                PathElement::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for AttributePath {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Wire form of [`AttributePath`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PathRepr {
    Text(String),
    Elements(Vec<PathElement>),
}

impl TryFrom<PathRepr> for AttributePath {
    type Error = ExpressionError;

    fn try_from(repr: PathRepr) -> Result<Self, Self::Error> {
        match repr {
            PathRepr::Text(text) => Self::parse(&text),
            PathRepr::Elements(elements) => Self::from_elements(elements),
        }
    }
}

impl From<AttributePath> for PathRepr {
    fn from(path: AttributePath) -> Self {
        if path.is_plain() {
            Self::Text(path.to_string())
        } else {
            Self::Elements(path.elements)
        }
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// Equal (`=`).
    #[serde(rename = "=")]
    Eq,
    /// Not equal (`<>`).
    #[serde(rename = "<>")]
    Ne,
    /// Less than (`<`).
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal (`<=`).
    #[serde(rename = "<=")]
    Le,
    /// Greater than (`>`).
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal (`>=`).
    #[serde(rename = ">=")]
    Ge,
}

impl CompareOp {
    /// Look up an operator by its symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Self::Eq),
            "<>" => Some(Self::Ne),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            _ => None,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::Ne => write!(f, "<>"),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
        }
    }
}

/// Logical joiner relating a condition to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Connector {
    /// Logical AND.
    #[default]
    #[serde(rename = "AND")]
    And,
    /// Logical OR.
    #[serde(rename = "OR")]
    Or,
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

/// Unary attribute predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeFunction {
    /// `attribute_exists(path)`.
    #[serde(rename = "attribute_exists")]
    Exists,
    /// `attribute_not_exists(path)`.
    #[serde(rename = "attribute_not_exists")]
    NotExists,
}

impl AttributeFunction {
    /// Look up a function by name. The `attribute_` prefix is optional.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.strip_prefix("attribute_").unwrap_or(name) {
            "exists" => Some(Self::Exists),
            "not_exists" => Some(Self::NotExists),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists => write!(f, "attribute_exists"),
            Self::NotExists => write!(f, "attribute_not_exists"),
        }
    }
}

/// Type descriptors accepted by `attribute_type(path, type)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttributeType {
    /// String.
    S,
    /// String set.
    Ss,
    /// Number.
    N,
    /// Number set.
    Ns,
    /// Binary.
    B,
    /// Binary set.
    Bs,
    /// Boolean.
    Bool,
    /// Null.
    Null,
    /// List.
    L,
    /// Map.
    M,
}

impl AttributeType {
    /// Returns the wire descriptor, e.g. `"SS"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::Ss => "SS",
            Self::N => "N",
            Self::Ns => "NS",
            Self::B => "B",
            Self::Bs => "BS",
            Self::Bool => "BOOL",
            Self::Null => "NULL",
            Self::L => "L",
            Self::M => "M",
        }
    }

    /// Look up a type by its wire descriptor.
    #[must_use]
    pub fn from_descriptor(descriptor: &str) -> Option<Self> {
        [
            Self::S,
            Self::Ss,
            Self::N,
            Self::Ns,
            Self::B,
            Self::Bs,
            Self::Bool,
            Self::Null,
            Self::L,
            Self::M,
        ]
        .into_iter()
        .find(|t| t.as_str() == descriptor)
    }
}

// ---------------------------------------------------------------------------
// Condition nodes
// ---------------------------------------------------------------------------

/// Condition expression node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all_fields = "PascalCase")]
pub enum Condition {
    /// `path op value`.
    Compare {
        /// Left-hand attribute.
        path: AttributePath,
        /// Comparison operator.
        op: CompareOp,
        /// Right-hand literal.
        value: AttributeValue,
    },
    /// `attribute_exists(path)` / `attribute_not_exists(path)`.
    AttributeFunction {
        /// Tested attribute.
        path: AttributePath,
        /// Predicate.
        function: AttributeFunction,
    },
    /// `attribute_type(path, type)`.
    AttributeType {
        /// Tested attribute.
        path: AttributePath,
        /// Expected type.
        attribute_type: AttributeType,
    },
    /// `begins_with(path, prefix)`.
    BeginsWith {
        /// Tested attribute.
        path: AttributePath,
        /// Expected prefix.
        prefix: AttributeValue,
    },
    /// `contains(path, value)`.
    Contains {
        /// Tested attribute.
        path: AttributePath,
        /// Substring or set element.
        value: AttributeValue,
    },
    /// `path BETWEEN lower AND upper`.
    Between {
        /// Tested attribute.
        path: AttributePath,
        /// Lower bound (inclusive).
        lower: AttributeValue,
        /// Upper bound (inclusive).
        upper: AttributeValue,
    },
    /// `path IN (v1, v2, ...)`.
    In {
        /// Tested attribute.
        path: AttributePath,
        /// Candidate values.
        values: Vec<AttributeValue>,
    },
    /// `size(path) op value`.
    SizeCompare {
        /// Measured attribute.
        path: AttributePath,
        /// Comparison operator.
        op: CompareOp,
        /// Right-hand literal.
        value: AttributeValue,
    },
    /// `NOT child`.
    Not(Box<Condition>),
    /// Ordered sequence of connector-tagged children.
    Group(Vec<GroupEntry>),
}

/// One child of a [`Condition::Group`].
///
/// The first entry's connector carries no meaning and is ignored on render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupEntry {
    /// Joiner relative to the previous entry.
    #[serde(default)]
    pub connector: Connector,
    /// The child node.
    pub condition: Condition,
}

impl Condition {
    /// `path op value`.
    #[must_use]
    pub fn compare(path: AttributePath, op: CompareOp, value: impl Into<AttributeValue>) -> Self {
        Self::Compare {
            path,
            op,
            value: value.into(),
        }
    }

    /// `attribute_exists(path)`.
    #[must_use]
    pub fn exists(path: AttributePath) -> Self {
        Self::AttributeFunction {
            path,
            function: AttributeFunction::Exists,
        }
    }

    /// `attribute_not_exists(path)`.
    #[must_use]
    pub fn not_exists(path: AttributePath) -> Self {
        Self::AttributeFunction {
            path,
            function: AttributeFunction::NotExists,
        }
    }

    /// `attribute_type(path, type)`.
    #[must_use]
    pub fn attribute_type(path: AttributePath, attribute_type: AttributeType) -> Self {
        Self::AttributeType {
            path,
            attribute_type,
        }
    }

    /// `begins_with(path, prefix)`.
    #[must_use]
    pub fn begins_with(path: AttributePath, prefix: impl Into<AttributeValue>) -> Self {
        Self::BeginsWith {
            path,
            prefix: prefix.into(),
        }
    }

    /// `contains(path, value)`.
    #[must_use]
    pub fn contains(path: AttributePath, value: impl Into<AttributeValue>) -> Self {
        Self::Contains {
            path,
            value: value.into(),
        }
    }

    /// `path BETWEEN lower AND upper`.
    #[must_use]
    pub fn between(
        path: AttributePath,
        lower: impl Into<AttributeValue>,
        upper: impl Into<AttributeValue>,
    ) -> Self {
        Self::Between {
            path,
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    /// `path IN (values...)`.
    #[must_use]
    pub fn is_in<I, V>(path: AttributePath, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        Self::In {
            path,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `size(path) op value`.
    #[must_use]
    pub fn size(path: AttributePath, op: CompareOp, value: impl Into<AttributeValue>) -> Self {
        Self::SizeCompare {
            path,
            op,
            value: value.into(),
        }
    }

    /// `NOT condition`.
    #[must_use]
    pub fn negate(condition: Condition) -> Self {
        Self::Not(Box::new(condition))
    }

    /// Returns `true` for a group without entries.
    #[must_use]
    pub fn is_empty_group(&self) -> bool {
        matches!(self, Self::Group(entries) if entries.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Update nodes
// ---------------------------------------------------------------------------

/// The right-hand side of a SET action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all_fields = "PascalCase")]
pub enum SetValue {
    /// Plain assignment of a literal.
    Literal(AttributeValue),
    /// `source + amount`.
    Increment {
        /// Attribute supplying the base number.
        source: AttributePath,
        /// Number to add.
        amount: AttributeValue,
    },
    /// `source - amount`.
    Decrement {
        /// Attribute supplying the base number.
        source: AttributePath,
        /// Number to subtract.
        amount: AttributeValue,
    },
    /// `list_append(source, values)`.
    ListAppend {
        /// Attribute supplying the base list.
        source: AttributePath,
        /// List appended at the end.
        values: AttributeValue,
    },
    /// `if_not_exists(source, default)`.
    IfNotExists {
        /// Attribute checked for existence.
        source: AttributePath,
        /// Value used when the attribute is missing.
        default: AttributeValue,
    },
}

/// A single SET action: `path = value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetAction {
    /// Target attribute path.
    pub path: AttributePath,
    /// Value to assign.
    pub value: SetValue,
}

/// A single ADD or DELETE action: `path value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValueAction {
    /// Target attribute path.
    pub path: AttributePath,
    /// Number or set operand.
    pub value: AttributeValue,
}

/// Update AST: one ordered sequence per clause keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UpdateNode {
    /// SET actions.
    pub set_actions: Vec<SetAction>,
    /// REMOVE actions.
    pub remove_paths: Vec<AttributePath>,
    /// ADD actions: add to numbers or sets.
    pub add_actions: Vec<ValueAction>,
    /// DELETE actions: remove elements from sets.
    pub delete_actions: Vec<ValueAction>,
}

impl UpdateNode {
    /// Returns `true` when no clause has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set_actions.is_empty()
            && self.remove_paths.is_empty()
            && self.add_actions.is_empty()
            && self.delete_actions.is_empty()
    }

    /// Every targeted path paired with the keyword of the clause holding it.
    pub fn targets(&self) -> impl Iterator<Item = (&'static str, &AttributePath)> {
        let set = self.set_actions.iter().map(|a| ("SET", &a.path));
        let remove = self.remove_paths.iter().map(|p| ("REMOVE", p));
        let add = self.add_actions.iter().map(|a| ("ADD", &a.path));
        let delete = self.delete_actions.iter().map(|a| ("DELETE", &a.path));
        set.chain(remove).chain(add).chain(delete)
    }
}

// ---------------------------------------------------------------------------
// Operation node
// ---------------------------------------------------------------------------

/// Everything one item-level write needs, ready for compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationNode {
    /// Target table.
    pub table_name: String,
    /// Primary key (update/delete style operations).
    pub key: Item,
    /// Item payload (put style operations).
    pub item: Item,
    /// Condition tree, normally a top-level [`Condition::Group`].
    pub condition: Condition,
    /// Update sequences.
    pub update: UpdateNode,
    /// Return-values selector; `None` compiles to `NONE`.
    pub return_values: Option<ReturnValue>,
}

impl OperationNode {
    /// An empty operation against `table_name`.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            key: Item::new(),
            item: Item::new(),
            condition: Condition::Group(Vec::new()),
            update: UpdateNode::default(),
            return_values: None,
        }
    }
}
