//! Pipelines.
//!
//! Pipelines work on directories of gzipped JSON-lines files, processing files in parallel,
//! and the module provides a light [pipeline::Pipeline] trait that enables easy and flexible pipeline creation.
pub mod convert;
pub mod filter;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod stats;

pub use convert::{ConvertPipeline, Unit};
pub use filter::FilterPipeline;
pub use pipeline::Pipeline;
pub use stats::StatsPipeline;
