//! Utility helpers shared across the WLST MCP workspace.

pub mod text_processing;

pub use text_processing::{mask_literal, redact_sensitive, redact_sensitive_with, tail_lines};
