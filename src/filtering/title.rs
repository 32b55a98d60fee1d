//! Document-level filtering on titles.
//!
//! Some documents are useless (lists of lists, disambiguation pages...)
//! or contain content that breaks downstream tools:
//! they are skipped when their title is matched by a pattern.
use log::debug;
use regex::Regex;

use crate::tree::Document;

use super::Filter;

/// Rejects documents whose title is matched (anywhere) by a pattern.
///
/// Documents without a title are kept.
#[derive(Debug, Clone, Default)]
pub struct TitleFilter {
    pattern: Option<Regex>,
}

impl TitleFilter {
    pub fn new(pattern: Option<Regex>) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}

impl Filter<&Document> for TitleFilter {
    fn detect(&self, doc: &Document) -> bool {
        match (&self.pattern, doc.title()) {
            (Some(pattern), Some(title)) if !title.is_empty() && pattern.is_match(&title) => {
                debug!("skipping document {}", title);
                false
            }
            _ => true,
        }
    }
}
