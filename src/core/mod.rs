//! Viewer-side processing of a parsed chat.
//!
//! This module contains:
//! - [`filter`] - Message filtering by date range and sender
//! - [`layout`] - Day separators and sender labels for a message list
//! - [`processor`] - Summary statistics
//! - [`models`] - Output configuration
//! - [`output`] - Format writers (JSON, JSONL)

pub mod filter;
pub mod layout;
pub mod models;
pub mod output;
pub mod processor;

pub use filter::{FilterConfig, apply_filters};
pub use layout::{DisplayRow, date_label, layout_rows};
pub use models::OutputConfig;
pub use processor::ChatStats;

#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
