/*! Filtering utilities

Filters operate on whole documents, and on the configuration
(lists of titles and patterns) the transformers use.

Filters implement [filter::Filter]: `detect` returns `true` for what should be kept.
! */
mod filter;
mod lists;
mod title;

pub use filter::Filter;
pub use lists::{disjunction, file_to_regex, file_to_set, pattern_count, read_lines};
pub use title::TitleFilter;
