//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_json`] / [`to_json`] - the whole chat as one JSON document
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one message per line
//!
//! Both require the `json-output` feature.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "json-output")]
//! # fn main() -> chatview::Result<()> {
//! use chatview::core::output::{to_jsonl, write_json};
//! use chatview::core::models::OutputConfig;
//! use chatview::parse_chat_text;
//!
//! let chat = parse_chat_text("15/01/2024, 10:30 - Alice: Hello!", None);
//! let config = OutputConfig::new().with_self_flag();
//!
//! write_json(&chat, "chat.json", &config)?;
//! let lines = to_jsonl(&chat, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
#[cfg(feature = "json-output")]
mod record;

#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
