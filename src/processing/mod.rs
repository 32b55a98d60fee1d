/*! Content processing

Aggregation of data over already extracted corpora.
!*/
pub mod stats;

pub use stats::{count_paragraph_chars, SectionStats, Statistics};
