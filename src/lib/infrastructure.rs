//! Infrastructure implementations

pub mod config;
pub mod email;
