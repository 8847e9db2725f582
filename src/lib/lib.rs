#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Configuration-driven mail dispatch
//!
//! Assembles a mail message from per-call options layered over
//! application-wide defaults and sends it through an SMTP transport.

pub mod domain;
pub mod infrastructure;
