//! Insider Trainer Library
//!
//! Boosted-tree training, rule extraction, and artifact export for the
//! insider-pattern detection models. The binary in `main.rs` is a thin CLI
//! wrapper over [`pipeline::run_pipeline`].

pub mod exporter;
pub mod pipeline;
pub mod rules;
pub mod trainer;
