//! Default option source

use std::collections::BTreeMap;

use serde_json::Value;

#[cfg(test)]
use mockall::mock;

/// Configuration namespace that default sources read from.
pub const NAMESPACE: &str = "mail.options";

/// A read-only source of fallback option values, scoped under the
/// [`NAMESPACE`] prefix.
///
/// Keys are relative to the namespace (`"host"`, `"port"`, ...); how the
/// namespace maps onto the backing store is up to each implementation. An
/// absent key means "no default", never zero or false.
pub trait DefaultSource: Send + Sync + 'static {
    /// Looks up a string value.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Looks up an integer value.
    fn get_int(&self, key: &str) -> Option<i64>;

    /// Looks up a boolean value.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Looks up a nested mapping, used for the free-form `props`.
    fn get_props(&self, key: &str) -> Option<BTreeMap<String, Value>>;
}

#[cfg(test)]
mock! {
    pub DefaultSource {}

    impl DefaultSource for DefaultSource {
        fn get_string(&self, key: &str) -> Option<String>;
        fn get_int(&self, key: &str) -> Option<i64>;
        fn get_bool(&self, key: &str) -> Option<bool>;
        fn get_props(&self, key: &str) -> Option<BTreeMap<String, Value>>;
    }
}
