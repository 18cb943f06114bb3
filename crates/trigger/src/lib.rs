//! Separator-row detection engine.
//!
//! This crate provides:
//! - `GridSource` trait over the host spreadsheet's read surface
//! - `JsonSnapshot` source backed by an exported snapshot document
//! - Separator scan primitives (`find_first_empty_row`, `is_row_red`)
//! - `evaluate` decision procedure producing a [`Decision`]

pub mod evaluator;
pub mod separator;
pub mod source;

pub use evaluator::{evaluate, Decision};
pub use separator::{find_first_empty_row, is_row_red, COLOR_SCAN_COLUMNS};
pub use source::{GridSource, JsonSnapshot, SourceError};
