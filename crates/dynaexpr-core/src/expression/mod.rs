//! Expression AST, builders and compiler.
//!
//! The pipeline is:
//!
//! 1. **Building**: [`ConditionBuilder`] and [`UpdateBuilder`] assemble an
//!    immutable AST from fluent calls, rejecting malformed arguments at the
//!    call site.
//! 2. **Compiling**: [`compile`] (or a [`Compiler`] shared by several
//!    expressions) walks the AST, allocating `#n`/`:v` placeholders from a
//!    [`PlaceholderTable`], and renders the expression text.

pub mod ast;
pub mod builder;
pub mod compiler;
pub mod placeholder;

pub use ast::{
    AttributeFunction, AttributePath, AttributeType, CompareOp, Condition, Connector, GroupEntry,
    OperationNode, PathElement, SetAction, SetValue, UpdateNode, ValueAction,
};
pub use builder::{Argument, ConditionBuilder, UpdateBuilder};
pub use compiler::{Compiler, compile};
pub use placeholder::{PlaceholderTable, Placeholders};
