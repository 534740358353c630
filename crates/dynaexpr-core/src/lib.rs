//! Condition and update expression builders for DynamoDB-style stores.
//!
//! Requests are assembled in three layers:
//!
//! - [`expression`] holds the AST, the fluent [`ConditionBuilder`] and
//!   [`UpdateBuilder`], and the [`compile`] pass that renders placeholder
//!   based expression text.
//! - [`operation`] wraps those builders per request kind (`PutItem`,
//!   `UpdateItem`, `Query`, ...) and produces the typed inputs of
//!   `dynaexpr-model`.
//! - [`error`] carries the single [`ExpressionError`] type raised by every
//!   builder call.
//!
//! ```
//! use dynaexpr_core::{ConditionBuilder, UpdateBuilder, compile};
//! use dynaexpr_core::expression::OperationNode;
//!
//! let condition = ConditionBuilder::new()
//!     .expression("status", "=", "active")?
//!     .or_expression("retries", ">", 3)?;
//! let update = UpdateBuilder::new()
//!     .set_expression("retries", "+", 1)?
//!     .remove("lock")?;
//!
//! let mut node = OperationNode::new("jobs");
//! node.condition = condition.build();
//! node.update = update.build();
//!
//! let command = compile(&node);
//! assert_eq!(command.condition_expression.as_deref(), Some("#n0 = :v0 OR #n1 > :v1"));
//! assert_eq!(command.update_expression.as_deref(), Some("SET #n1 = #n1 + :v2 REMOVE #n2"));
//! # Ok::<(), dynaexpr_core::ExpressionError>(())
//! ```
#![allow(clippy::doc_markdown, clippy::module_name_repetitions)]

pub mod error;
pub mod expression;
pub mod operation;

pub use error::{ExpressionError, ExpressionResult};
pub use expression::{Argument, Compiler, ConditionBuilder, UpdateBuilder, compile};
pub use operation::{Conditional, DeleteItem, Filtered, GetItem, PutItem, Query, Scan, UpdateItem};
