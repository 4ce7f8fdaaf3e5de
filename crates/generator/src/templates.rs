//! Template loading and management

use opgen_common::{GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Name of the per-operation template
pub const OPERATION: &str = "operation.rs";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("rust_str", rust_str_filter);

    tera.add_raw_template(OPERATION, include_str!("../templates/operation.rs.tera"))
        .map_err(|e| {
            GeneratorError::Template(format!("Failed to load {} template: {}", OPERATION, e))
        })?;

    Ok(tera)
}

/// Filter to turn a string into a Rust string literal
fn rust_str_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("rust_str filter expects a string"))?;

    Ok(Value::String(format!("{:?}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_templates() {
        let tera = load_templates().unwrap();
        assert!(tera.get_template_names().any(|name| name == OPERATION));
    }

    #[test]
    fn test_rust_str_filter_escapes() {
        let value = Value::String(r#"/{Bucket}?x="y"\z"#.to_string());
        let result = rust_str_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(result, Value::String(r#""/{Bucket}?x=\"y\"\\z""#.to_string()));
    }

    #[test]
    fn test_rust_str_filter_rejects_non_strings() {
        let result = rust_str_filter(&Value::Bool(true), &HashMap::new());
        assert!(result.is_err());
    }
}
