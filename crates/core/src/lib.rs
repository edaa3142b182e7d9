//! Core types, key derivation, and merge semantics for the lead pipeline.

pub mod error;
pub mod lead;
pub mod merge;

pub use error::{Error, Result};
pub use lead::*;
pub use merge::merge_records;
