//! Tool infrastructure — catalog, argument validation, typed invocations.
//!
//! Raw `tools/call` arguments flow catalog lookup → [`validate_arguments`]
//! → [`ToolCall::from_args`]; nothing downstream reads untyped JSON.

pub mod call;
pub mod catalog;
pub mod validation;

pub use call::{GoalUpdate, NewBook, ToolCall};
pub use catalog::{ParamDef, ParamType, ToolCatalog, ToolDefinition, ToolName};
pub use validation::{validate_arguments, ArgValue, ValidatedArgs};
