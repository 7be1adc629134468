//! Argument validation against a tool's parameter definitions.
//!
//! Raw JSON arguments are checked parameter by parameter, in declaration
//! order, and coerced into [`ValidatedArgs`]. The first violated constraint
//! aborts validation. Strings are trimmed before any check, so a
//! whitespace-only value is indistinguishable from an absent one.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::tools::catalog::{ParamDef, ParamType, ToolDefinition, ToolName};
use crate::types::{Error, Result};

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Integer(u64),
    Text(String),
}

/// Arguments that passed validation. Absent or blank optionals are not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedArgs {
    tool: ToolName,
    values: BTreeMap<&'static str, ArgValue>,
}

impl ValidatedArgs {
    pub fn tool(&self) -> ToolName {
        self.tool
    }

    /// Required integer. Absence here means the catalog and caller disagree.
    pub fn integer(&self, name: &str) -> Result<u64> {
        self.optional_integer(name)
            .ok_or_else(|| Error::internal(format!("{} has no integer argument '{}'", self.tool, name)))
    }

    pub fn optional_integer(&self, name: &str) -> Option<u64> {
        match self.values.get(name) {
            Some(ArgValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Required, already-trimmed text.
    pub fn text(&self, name: &str) -> Result<&str> {
        self.optional_text(name)
            .ok_or_else(|| Error::internal(format!("{} has no text argument '{}'", self.tool, name)))
    }

    pub fn optional_text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Validate and coerce raw arguments for `definition`.
///
/// Parameters not declared by the tool are ignored.
pub fn validate_arguments(
    definition: &ToolDefinition,
    args: &Map<String, Value>,
) -> Result<ValidatedArgs> {
    let mut values = BTreeMap::new();

    for param in &definition.parameters {
        if let Some(value) = coerce_param(param, args.get(param.name))? {
            values.insert(param.name, value);
        }
    }

    for key in args.keys() {
        if !definition.parameters.iter().any(|p| p.name == key.as_str()) {
            tracing::debug!(tool = %definition.name, parameter = %key, "ignoring undeclared parameter");
        }
    }

    Ok(ValidatedArgs {
        tool: definition.name,
        values,
    })
}

fn coerce_param(param: &ParamDef, raw: Option<&Value>) -> Result<Option<ArgValue>> {
    let coerced = match raw {
        None | Some(Value::Null) => None,
        Some(value) => match param.param_type {
            ParamType::Integer { minimum } => {
                Some(ArgValue::Integer(coerce_integer(param, value, minimum)?))
            }
            ParamType::String => coerce_text(param, value)?.map(ArgValue::Text),
        },
    };

    if coerced.is_none() && param.required {
        return Err(Error::validation(format!(
            "Missing required parameter: {}",
            param.name
        )));
    }
    Ok(coerced)
}

fn coerce_integer(param: &ParamDef, value: &Value, minimum: u64) -> Result<u64> {
    let reject = || {
        Error::validation(format!(
            "Parameter '{}' must be a {}, got {}",
            param.name,
            param.param_type.display_name(),
            value
        ))
    };

    let Value::Number(number) = value else {
        return Err(reject());
    };

    let n = if let Some(n) = number.as_u64() {
        n
    } else if number.is_i64() {
        // Negative integers never satisfy a non-negative bound.
        return Err(reject());
    } else {
        // Whole-valued floats such as `3.0` are accepted.
        match number.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 => f as u64,
            _ => return Err(reject()),
        }
    };

    if n < minimum {
        return Err(reject());
    }
    Ok(n)
}

fn coerce_text(param: &ParamDef, value: &Value) -> Result<Option<String>> {
    let Value::String(s) = value else {
        return Err(Error::validation(format!(
            "Parameter '{}' must be a string, got {}",
            param.name,
            value_type_name(value)
        )));
    };

    let trimmed = s.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog::ToolCatalog;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn validate(tool: &str, args: Value) -> Result<ValidatedArgs> {
        let catalog = ToolCatalog::new();
        let definition = catalog.get(tool).unwrap();
        validate_arguments(definition, args.as_object().unwrap())
    }

    fn validation_message(result: Result<ValidatedArgs>) -> String {
        match result {
            Err(Error::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_add_book() {
        let args = validate(
            "add_book",
            json!({"title": "  Dune ", "author": "Herbert", "bookshelf_id": 3}),
        )
        .unwrap();
        assert_eq!(args.text("title").unwrap(), "Dune");
        assert_eq!(args.integer("bookshelf_id").unwrap(), 3);
        assert_eq!(args.optional_text("isbn"), None);
        assert_eq!(args.optional_text("cover_url"), None);
    }

    #[test]
    fn test_missing_required_names_parameter() {
        let msg = validation_message(validate("add_book", json!({"author": "Herbert", "bookshelf_id": 3})));
        assert_eq!(msg, "Missing required parameter: title");
    }

    #[test]
    fn test_first_violation_wins() {
        let msg = validation_message(validate("add_book", json!({"bookshelf_id": 0})));
        assert_eq!(msg, "Missing required parameter: title");
    }

    #[test]
    fn test_null_is_absent() {
        let msg = validation_message(validate("get_goal_progress", json!({"goal_id": null})));
        assert_eq!(msg, "Missing required parameter: goal_id");
    }

    #[test]
    fn test_blank_optional_is_omitted() {
        let args = validate(
            "add_book",
            json!({"title": "Dune", "author": "Herbert", "bookshelf_id": 3, "isbn": "   ", "cover_url": ""}),
        )
        .unwrap();
        assert_eq!(args.optional_text("isbn"), None);
        assert_eq!(args.optional_text("cover_url"), None);
    }

    #[test]
    fn test_optional_wrong_type_rejected() {
        let msg = validation_message(validate(
            "add_book",
            json!({"title": "Dune", "author": "Herbert", "bookshelf_id": 3, "isbn": 9780441}),
        ));
        assert_eq!(msg, "Parameter 'isbn' must be a string, got number");
    }

    #[test]
    fn test_string_id_rejected() {
        let msg = validation_message(validate("get_bookshelf_books", json!({"bookshelf_id": "3"})));
        assert!(msg.contains("must be a positive integer"), "{msg}");
    }

    #[test]
    fn test_whole_float_accepted() {
        let args = validate("get_bookshelf_books", json!({"bookshelf_id": 3.0})).unwrap();
        assert_eq!(args.integer("bookshelf_id").unwrap(), 3);
    }

    #[test]
    fn test_progress_zero_allowed_but_negative_rejected() {
        let args = validate("update_reading_goal", json!({"goal_id": 1, "value": 12, "progress": 0})).unwrap();
        assert_eq!(args.optional_integer("progress"), Some(0));

        let msg = validation_message(validate(
            "update_reading_goal",
            json!({"goal_id": 1, "value": 12, "progress": -1}),
        ));
        assert!(msg.contains("must be a non-negative integer"), "{msg}");
    }

    #[test]
    fn test_goal_value_zero_rejected() {
        let msg = validation_message(validate("update_reading_goal", json!({"goal_id": 1, "value": 0})));
        assert!(msg.starts_with("Parameter 'value'"), "{msg}");
    }

    #[test]
    fn test_undeclared_parameters_ignored() {
        let args = validate("get_bookshelves", json!({"verbose": true})).unwrap();
        assert_eq!(args.tool(), ToolName::GetBookshelves);
        assert_eq!(args.optional_text("verbose"), None);
    }

    #[test]
    fn test_validator_agrees_with_advertised_schema() {
        let catalog = ToolCatalog::new();
        let definition = catalog.get("rename_bookshelf").unwrap();
        let schema = jsonschema::validator_for(&definition.input_schema()).unwrap();

        for args in [
            json!({"bookshelf_id": 2, "name": "Sci-Fi"}),
            json!({"bookshelf_id": 0, "name": "Sci-Fi"}),
            json!({"bookshelf_id": 2, "name": ""}),
            json!({"bookshelf_id": 2, "name": "   "}),
            json!({"bookshelf_id": 2, "name": " \t\n"}),
            json!({"name": "Sci-Fi"}),
            json!({"bookshelf_id": 2.5, "name": "Sci-Fi"}),
        ] {
            let ours = validate_arguments(definition, args.as_object().unwrap()).is_ok();
            assert_eq!(ours, schema.is_valid(&args), "disagreement on {args}");
        }
    }

    proptest! {
        #[test]
        fn prop_positive_ids_accepted(id in 1u64..=i64::MAX as u64) {
            let args = validate("get_bookshelf_books", json!({"bookshelf_id": id})).unwrap();
            prop_assert_eq!(args.integer("bookshelf_id").unwrap(), id);
        }

        #[test]
        fn prop_non_positive_ids_rejected(id in i64::MIN..=0i64) {
            let result = validate("get_goal_progress", json!({"goal_id": id}));
            prop_assert!(matches!(result, Err(Error::Validation(_))));
        }

        #[test]
        fn prop_fractional_ids_rejected(whole in 0u32..10_000, frac in 0.01f64..0.99) {
            let result = validate("get_bookshelf_books", json!({"bookshelf_id": whole as f64 + frac}));
            prop_assert!(matches!(result, Err(Error::Validation(_))));
        }

        #[test]
        fn prop_whitespace_name_is_missing(name in "[ \t\n\r]{0,12}") {
            let msg = validation_message(validate("add_bookshelf", json!({"name": name})));
            prop_assert_eq!(msg, "Missing required parameter: name");
        }
    }
}
