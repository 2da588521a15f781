//! Insider Detection Core Library
//!
//! Shared dataset loading, feature definitions, splitting utilities, and
//! evaluation metrics for the insider-pattern model trainer.

pub mod dataset;
pub mod error;
pub mod features;
pub mod metrics;
pub mod split;

pub use error::{Error, Result};
