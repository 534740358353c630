//! Wire model types for dynaexpr.
//!
//! This crate holds the request shapes the expression compiler produces:
//! attribute values with the store's single-key JSON encoding, the generic
//! compiled [`Command`], and typed inputs for the item-level operations.
//! Everything here is plain data with serde derives.
// "DynamoDB" style wire names appear in many doc comments in this crate.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod attribute_value;
pub mod command;
pub mod input;
pub mod types;

pub use attribute_value::AttributeValue;
pub use command::{Command, Item};
pub use input::{
    DeleteItemInput, GetItemInput, PutItemInput, QueryInput, ScanInput, UpdateItemInput,
};
pub use types::{ReturnValue, Select};
