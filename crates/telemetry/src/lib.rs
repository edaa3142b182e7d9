//! Tracing setup for the lead pipeline.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_from_env, TracingConfig, DEFAULT_FILTER};
