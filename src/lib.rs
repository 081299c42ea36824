//! treemap-rs: reactive word-distribution treemap pipeline.
//!
//! This crate provides a Rust-idiomatic update pipeline for a hierarchical
//! "word distribution" visualization: a pure country → collection → counts
//! transform, a chart-service lifecycle wrapper around a pluggable treemap
//! backend, and a scheduler that coalesces data/language/size changes into
//! frame-aligned renders.

pub mod api;
pub mod core;
pub mod error;
pub mod locale;
pub mod render;
pub mod telemetry;

pub use api::{ChartOptions, ChartService, UpdateScheduler};
pub use error::{TreemapError, TreemapResult};
