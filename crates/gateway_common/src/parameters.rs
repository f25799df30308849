//! Ordered parameter storage shared by every value object a gateway accepts.
//!
//! Entities declare the keys they understand through a static table of [`Field`]s.
//! [`Parameterized::initialize`] walks the incoming parameters, invokes the setter of
//! every recognised key and drops the rest without complaint.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logger;

/// Ordered mapping of parameter names to values.
pub type Parameters = IndexMap<String, Value>;

/// Insertion ordered parameter storage.
///
/// Overwriting an existing key keeps the key at its original position.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBag(Parameters);

impl ParameterBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value stored under `key` when it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Stores `value` under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Whether a value has been stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether the value under `key` is absent or blank, see [`is_blank`].
    pub fn is_missing(&self, key: &str) -> bool {
        self.0.get(key).map_or(true, is_blank)
    }

    /// Number of stored parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the stored parameters in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Snapshot of every stored parameter.
    pub fn all(&self) -> Parameters {
        self.0.clone()
    }
}

impl From<Parameters> for ParameterBag {
    fn from(parameters: Parameters) -> Self {
        Self(parameters)
    }
}

impl<'a> IntoIterator for &'a ParameterBag {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A value counts as blank when it is null, `false`, zero, an empty string, the string
/// `"0"`, or an empty array or object.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Converts a parameter value into the string form stored by string typed setters.
///
/// Null becomes an empty string, other non-string scalars use their JSON rendering.
pub fn string_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A recognised parameter key together with the setter it dispatches to.
pub struct Field<T> {
    /// Parameter name, as passed by integrators.
    pub key: &'static str,
    /// Setter invoked with the incoming value.
    pub apply: fn(&mut T, Value),
}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field").field("key", &self.key).finish()
    }
}

/// Common contract of every parameter backed value object.
pub trait Parameterized: Sized + 'static {
    /// Keys this entity understands, each mapped to its setter.
    const FIELDS: &'static [Field<Self>];

    /// Backing storage.
    fn parameters(&self) -> &ParameterBag;

    /// Mutable backing storage.
    fn parameters_mut(&mut self) -> &mut ParameterBag;

    /// Clears the entity and applies every recognised entry of `parameters`.
    ///
    /// Keys without a matching field are skipped, so construction never fails on
    /// unexpected input.
    fn initialize(&mut self, parameters: Option<Parameters>) -> &mut Self {
        *self.parameters_mut() = ParameterBag::new();

        for (key, value) in parameters.into_iter().flatten() {
            match Self::FIELDS.iter().find(|field| field.key == key) {
                Some(field) => (field.apply)(self, value),
                None => logger::trace!(parameter = %key, "skipping unrecognised parameter"),
            }
        }

        self
    }

    /// Returns the value stored under `key`.
    fn get_parameter(&self, key: &str) -> Option<&Value> {
        self.parameters().get(key)
    }

    /// Stores `value` under `key` without any validation.
    fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.parameters_mut().set(key, value);
        self
    }

    /// Snapshot of all stored parameters.
    fn get_parameters(&self) -> Parameters {
        self.parameters().all()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[derive(Debug, Default)]
    struct Widget {
        parameters: ParameterBag,
    }

    impl Widget {
        fn set_colour(&mut self, value: impl Into<String>) -> &mut Self {
            self.set_parameter("colour", value.into())
        }
    }

    impl Parameterized for Widget {
        const FIELDS: &'static [Field<Self>] = &[Field {
            key: "colour",
            apply: |widget, value| {
                widget.set_colour(string_value(value));
            },
        }];

        fn parameters(&self) -> &ParameterBag {
            &self.parameters
        }

        fn parameters_mut(&mut self) -> &mut ParameterBag {
            &mut self.parameters
        }
    }

    fn parameters(value: Value) -> Parameters {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn initialize_skips_unknown_keys() {
        let mut widget = Widget::default();
        widget.initialize(Some(parameters(json!({ "colour": "red", "size": 4 }))));

        assert_eq!(widget.get_parameter("colour"), Some(&json!("red")));
        assert_eq!(widget.get_parameter("size"), None);
        assert_eq!(widget.get_parameters().len(), 1);
    }

    #[test]
    fn initialize_with_none_clears_parameters() {
        let mut widget = Widget::default();
        widget.set_colour("blue");
        widget.initialize(None);

        assert!(widget.get_parameters().is_empty());
    }

    #[test]
    fn set_parameter_keeps_insertion_order() {
        let mut widget = Widget::default();
        widget
            .set_parameter("b", 1)
            .set_parameter("a", 2)
            .set_parameter("b", 3);

        let keys: Vec<&String> = widget.parameters().iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(widget.get_parameter("b"), Some(&json!(3)));
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!("")));
        assert!(is_blank(&json!(false)));
        assert!(is_blank(&json!([])));
        assert!(is_blank(&json!({})));
        assert!(is_blank(&json!("0")));
        assert!(is_blank(&json!(0)));
        assert!(is_blank(&json!(0.0)));
        assert!(!is_blank(&json!("00")));
        assert!(!is_blank(&json!(" ")));
        assert!(!is_blank(&json!(7)));
    }

    #[test]
    fn string_value_renders_scalars() {
        assert_eq!(string_value(json!("abc")), "abc");
        assert_eq!(string_value(json!(112233)), "112233");
        assert_eq!(string_value(Value::Null), "");
    }
}
