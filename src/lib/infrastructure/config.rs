//! Default source implementations.

mod env;
mod json;

pub use env::EnvDefaults;
pub use json::JsonDefaults;
