//! JSON-document default source

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::mail::{DefaultSource, NAMESPACE};

/// [`DefaultSource`] reading from a `serde_json` document.
///
/// Values are looked up under the `mail.options` namespace, i.e. a
/// document shaped like:
///
/// ```json
/// {
///   "mail": {
///     "options": {
///       "host": "smtp.example.com",
///       "port": 587,
///       "props": { "mail.smtp.timeout": 5000 }
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonDefaults {
    options: Value,
}

impl JsonDefaults {
    /// Wraps a configuration document, scoping lookups to `mail.options`.
    pub fn new(document: Value) -> Self {
        let pointer = format!("/{}", NAMESPACE.replace('.', "/"));
        let options = document.pointer(&pointer).cloned().unwrap_or(Value::Null);

        Self { options }
    }

    /// A source with no defaults at all.
    pub fn empty() -> Self {
        Self {
            options: Value::Null,
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

impl DefaultSource for JsonDefaults {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(String::from)
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    fn get_props(&self, key: &str) -> Option<BTreeMap<String, Value>> {
        let map = self.get(key)?.as_object()?;

        Some(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}
