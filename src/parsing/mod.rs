//! Parsers for target list input formats.
//!
//! Two formats are supported:
//!
//! - [`target_list`]: the flat delimited format, one target per line with
//!   fields separated by the `,.` token (allowing embedded commas)
//! - [`json_targets`]: a structured JSON array of target objects
//!
//! Coordinate fields accept colon-separated sexagesimal or decimal values;
//! see [`coordinates`].

pub mod coordinates;
pub mod json_targets;
pub mod target_list;

#[cfg(test)]
mod target_list_tests;

pub use target_list::{parse_target_list, LineError, ParseSummary};
