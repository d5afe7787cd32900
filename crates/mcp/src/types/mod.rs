//! Crate-level types shared by the tool pipeline.

pub mod errors;

pub use errors::WlstError;
