/*! Normalization and filtering of simple HTML documents.

Documents (Wikipedia pages, Project Gutenberg books) come as a minimal HTML
dialect: an `html` root, a `head` with a `title`, and a `body` made of nested
`section`s holding headings, paragraphs and lists.

- [tree] holds the document model and a mutation-safe traversal,
- [transformers] the normalization and filtering passes built on it,
- [pipelines] apply them to whole directories of document files.
!*/
pub mod converters;
pub mod error;
pub mod filtering;
pub mod io;
pub mod pipelines;
pub mod processing;
pub mod transformers;
pub mod tree;
