//! The grammar document tree
//!
//!     A grammar document is the value tree shared by every format: ordered mappings with string
//!     keys, sequences, and scalars (string, number, boolean, null). Formats parse into it and
//!     serialize out of it, so a conversion never sees the surface syntax of the other side.
//!
//!     The tree is backed by `serde_json::Value` built with `preserve_order`, which keeps mapping
//!     keys in the order they appeared in the source.
//!
//! From YAML
//!
//!     YAML is richer than the tree, so loading normalises a few constructs:
//!
//!     - Merge keys (`<<: *base`) are expanded and aliases resolve to copies of their anchor.
//!     - Scalar keys that are not strings are spelled the way JSON spells the scalar
//!       (`true`, `null`, `1`, `2.5`).
//!     - Tagged values (`!regex '\d+'`) lose the tag and keep the value.
//!     - Mappings or sequences used as keys are rejected, as are non-finite floats.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;
use std::path::PathBuf;

use crate::error::{ConvertError, Result};

/// An immutable grammar value tree.
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarDocument {
    root: Value,
}

impl GrammarDocument {
    /// Wrap an already-built JSON value.
    pub fn from_json(root: Value) -> Self {
        GrammarDocument { root }
    }

    /// Build the tree from a parsed YAML value, expanding merge keys first.
    pub fn from_yaml(mut value: YamlValue) -> Result<Self> {
        value.apply_merge().map_err(|e| yaml_error(e.to_string()))?;
        Ok(GrammarDocument {
            root: yaml_to_json(value)?,
        })
    }

    /// Convert the tree into a YAML value for YAML output.
    pub fn to_yaml(&self) -> Result<YamlValue> {
        serde_yaml::to_value(&self.root).map_err(|e| ConvertError::Serialize {
            format: "yaml".to_string(),
            message: e.to_string(),
        })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_root(self) -> Value {
        self.root
    }

    /// Short description of the root node, used in log output.
    pub fn summary(&self) -> String {
        match &self.root {
            Value::Object(map) => format!("mapping with {} keys", map.len()),
            Value::Array(items) => format!("sequence of {} items", items.len()),
            Value::Null => "null".to_string(),
            _ => "scalar".to_string(),
        }
    }
}

fn yaml_to_json(value: YamlValue) -> Result<Value> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => Value::Number(number(&n)?),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(key_string(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn number(n: &serde_yaml::Number) -> Result<Number> {
    if let Some(i) = n.as_i64() {
        return Ok(Number::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Number::from(u));
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    Number::from_f64(f).ok_or_else(|| ConvertError::Unrepresentable(format!("number {}", n)))
}

fn key_string(key: YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Number(n) => Ok(number(&n)?.to_string()),
        YamlValue::Tagged(tagged) => key_string(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(yaml_error(
            "mapping keys must be scalars, found a collection".to_string(),
        )),
    }
}

fn yaml_error(message: String) -> ConvertError {
    ConvertError::Parse {
        path: PathBuf::new(),
        format: "yaml".to_string(),
        message,
    }
}
