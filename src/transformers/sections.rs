/*! Trailing section filtering.

Removes boilerplate sections ("See also", "References", ...) from the end
of a document. Only a *trailing run* of top-level sections is eligible:

Top-level sections are examined from the last one backwards. A section is removed if

- it has no title (no heading child at all),
- its title is in the unwanted set, or matched by the unwanted pattern,
- or it is empty (see [super::is_empty]).

The first section that is kept stops the scan: sections before it
are never examined, even if their titles are unwanted.

```text
[Keep, Drop, Drop] -> [Keep]
[Drop, Keep, Drop] -> [Drop, Keep]
```

Title-less sections are treated as part of the trailing run and removed,
not as a stop signal.
!*/
use std::collections::HashSet;

use log::debug;
use regex::Regex;

use crate::error::Error;
use crate::tree::{visit, Document, Element, Enter, Slot, Tag, Visitor};

use super::prune::is_empty;
use super::Transform;

/// Title of a section: the trimmed text of its first heading child.
///
/// `None` if the section has no heading, which is different from an empty title.
pub fn section_title(section: &Element) -> Option<String> {
    section
        .child_elements()
        .find(|e| e.tag().is_heading())
        .map(|heading| heading.text_content().trim().to_string())
}

/// Unwanted section titles: a set of exact titles and/or a pattern.
#[derive(Debug, Clone, Default)]
pub struct SectionFilter {
    titles: HashSet<String>,
    pattern: Option<Regex>,
}

impl SectionFilter {
    pub fn new(titles: HashSet<String>, pattern: Option<Regex>) -> Self {
        Self { titles, pattern }
    }

    /// Filter on exact titles only.
    pub fn with_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(titles.into_iter().map(Into::into).collect(), None)
    }

    /// `true` if the filter would never match anything.
    pub fn is_noop(&self) -> bool {
        self.titles.is_empty() && self.pattern.is_none()
    }

    /// Whether `title` is unwanted. An absent title never matches.
    pub fn matches(&self, title: Option<&str>) -> bool {
        match title {
            None => false,
            Some(title) => {
                self.titles.contains(title)
                    || self
                        .pattern
                        .as_ref()
                        .map_or(false, |pattern| pattern.is_match(title))
            }
        }
    }

    pub fn titles(&self) -> &HashSet<String> {
        &self.titles
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}

struct TrailingSections<'a> {
    filter: &'a SectionFilter,
    removed: usize,
}

impl Visitor for TrailingSections<'_> {
    fn enter(&mut self, slot: Slot<'_>) -> Result<Enter, Error> {
        let element = match slot.element() {
            Some(e) => e,
            None => return Ok(Enter::Skip),
        };

        match element.tag() {
            // the containers sections live in
            Tag::Html | Tag::Body => return Ok(Enter::Descend),
            Tag::Section => (),
            _ => return Ok(Enter::Skip),
        }

        let title = section_title(element);
        let remove = match &title {
            None => true,
            Some(t) => self.filter.matches(Some(t)) || is_empty(element),
        };

        if remove {
            debug!("removing trailing section {:?}", title);
            slot.remove();
            self.removed += 1;
            Ok(Enter::Skip)
        } else {
            debug!("first section kept: {:?}", title);
            Ok(Enter::Stop)
        }
    }
}

/// Remove the trailing run of unwanted top-level sections.
///
/// `root` is either the `html` element or the `body`.
/// Returns the number of sections removed.
pub fn remove_trailing_sections(root: &mut Element, filter: &SectionFilter) -> Result<usize, Error> {
    let mut visitor = TrailingSections { filter, removed: 0 };
    visit(root, &mut visitor)?;
    Ok(visitor.removed)
}

/// [Transform] running [remove_trailing_sections] on the whole document.
#[derive(Debug, Clone, Default)]
pub struct RemoveSections {
    filter: SectionFilter,
}

impl RemoveSections {
    pub fn new(filter: SectionFilter) -> Self {
        Self { filter }
    }
}

impl Transform for RemoveSections {
    fn transform(&self, doc: &mut Document) -> Result<(), Error> {
        remove_trailing_sections(doc.root_mut(), &self.filter)?;
        Ok(())
    }
}
