//! JSON-shaped configuration trees.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::key::ConfigKey;

/// A configuration tree whose root is always an object.
///
/// Object keys are kept in sorted order, so two trees built from the same
/// patches serialize identically no matter how the patches were produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ConfigTree(Value);

impl Default for ConfigTree {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(_) => Ok(Self(value)),
            Value::Null => Ok(Self::default()),
            other => Err(ConfigError::InvalidValue {
                field: "config".to_string(),
                hint: Some(format!(
                    "expected a table of settings, found {}",
                    describe(&other)
                )),
            }),
        }
    }

    /// Tree holding a single value at `key`, with intermediate tables created.
    pub fn single(key: &ConfigKey, value: Value) -> Self {
        let mut nested = value;
        for segment in key.segments().collect::<Vec<_>>().into_iter().rev() {
            let mut map = Map::new();
            map.insert(segment.to_string(), nested);
            nested = Value::Object(map);
        }
        Self(nested)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub(crate) fn value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_object().is_none_or(Map::is_empty)
    }

    /// Look up a dotted path. Numeric segments index into arrays.
    pub fn get(&self, key: &ConfigKey) -> Option<&Value> {
        let mut current = &self.0;
        for segment in key.segments() {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn contains(&self, key: &ConfigKey) -> bool {
        self.get(key).is_some()
    }

    pub fn get_str(&self, key: &ConfigKey) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Write `value` at `key`, creating intermediate tables.
    ///
    /// Fails when an intermediate segment already holds a non-table value.
    pub fn set(&mut self, key: &ConfigKey, value: Value) -> Result<()> {
        let segments: Vec<&str> = key.segments().collect();
        let Some((last, parents)) = segments.split_last() else {
            return Ok(());
        };

        let mut current = &mut self.0;
        for (depth, segment) in parents.iter().enumerate() {
            if current.is_null() {
                *current = Value::Object(Map::new());
            }
            let Value::Object(map) = current else {
                return Err(ConfigError::InvalidValue {
                    field: key.to_string(),
                    hint: Some(format!(
                        "'{}' is not a table",
                        ConfigKey::from_segments(&segments[..depth])
                    )),
                });
            };
            current = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        if current.is_null() {
            *current = Value::Object(Map::new());
        }
        match current {
            Value::Object(map) => {
                map.insert(last.to_string(), value);
                Ok(())
            }
            _ => Err(ConfigError::InvalidValue {
                field: key.to_string(),
                hint: Some(format!(
                    "'{}' is not a table",
                    ConfigKey::from_segments(parents)
                )),
            }),
        }
    }

    /// Every non-table value with its key, in key order. Arrays are leaves.
    pub fn leaves(&self) -> Vec<(ConfigKey, &Value)> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        collect_leaves(&self.0, &mut path, &mut out);
        out
    }
}

fn collect_leaves<'a>(value: &'a Value, path: &mut Vec<&'a str>, out: &mut Vec<(ConfigKey, &'a Value)>) {
    match value {
        Value::Object(map) if !map.is_empty() || path.is_empty() => {
            for (name, child) in map {
                path.push(name);
                collect_leaves(child, path, out);
                path.pop();
            }
        }
        _ => out.push((ConfigKey::from_segments(path), value)),
    }
}

impl TryFrom<Value> for ConfigTree {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<ConfigTree> for Value {
    fn from(tree: ConfigTree) -> Self {
        tree.0
    }
}

impl From<Map<String, Value>> for ConfigTree {
    fn from(map: Map<String, Value>) -> Self {
        Self(Value::Object(map))
    }
}

/// Whether a value counts as "absent" for mandatory-field purposes.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(raw: &str) -> ConfigKey {
        ConfigKey::parse(raw).unwrap()
    }

    #[test]
    fn get_walks_objects_and_arrays() {
        let tree = ConfigTree::from_value(json!({
            "pwa": { "manifest": { "icons": [{ "src": "a.png" }, { "src": "b.png" }] } }
        }))
        .unwrap();

        assert_eq!(tree.get_str(&key("pwa.manifest.icons.1.src")), Some("b.png"));
        assert!(tree.get(&key("pwa.manifest.icons.2")).is_none());
        assert!(tree.get(&key("pwa.manifest.icons.x")).is_none());
    }

    #[test]
    fn set_creates_intermediate_tables() {
        let mut tree = ConfigTree::new();
        tree.set(&key("build.env.APP_API"), json!("/api")).unwrap();
        assert_eq!(tree.as_value(), &json!({ "build": { "env": { "APP_API": "/api" } } }));
    }

    #[test]
    fn set_refuses_to_descend_into_scalars() {
        let mut tree = ConfigTree::from_value(json!({ "build": "oops" })).unwrap();
        let err = tree.set(&key("build.publicPath"), json!("/")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn single_nests_value() {
        let tree = ConfigTree::single(&key("framework.plugins"), json!(["Notify"]));
        assert_eq!(tree.as_value(), &json!({ "framework": { "plugins": ["Notify"] } }));
    }

    #[test]
    fn leaves_stop_at_arrays_and_empty_tables() {
        let tree = ConfigTree::from_value(json!({
            "build": { "publicPath": "/ui", "env": {} },
            "framework": { "plugins": ["Notify", "Meta"] }
        }))
        .unwrap();

        let leaves: Vec<String> = tree.leaves().into_iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(leaves, vec!["build.env", "build.publicPath", "framework.plugins"]);
    }

    #[test]
    fn rejects_non_object_roots() {
        assert!(ConfigTree::from_value(json!([1, 2])).is_err());
        assert!(ConfigTree::from_value(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn emptiness_rules() {
        assert!(is_empty_value(&json!(null)));
        assert!(is_empty_value(&json!("  ")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
        assert!(!is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!(0)));
    }
}
