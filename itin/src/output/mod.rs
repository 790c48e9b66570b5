//! Output formatting module for trips and events.
//!
//! This module turns domain objects into CLI-ready text: a tab-separated
//! table with an uppercase header line, pretty-printed JSON, or YAML. The
//! [`Tabular`] trait defines which fields a type exposes in list output;
//! the same rows also feed delimited writers at the call site.

mod formatters;

pub use formatters::{format_json, format_table, format_yaml, Tabular};
