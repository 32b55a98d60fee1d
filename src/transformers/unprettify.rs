//! Whitespace normalization.
//!
//! Extraction leaves indentation and newlines between tags as text nodes,
//! and padding around meaningful strings. [unprettify] gets rid of both:
//!
//! - whitespace-only text nodes are removed,
//! - other text nodes are trimmed (and left untouched if there is nothing to trim).
//!
//! [merge_strings] concatenates adjacent text nodes.
use itertools::Itertools;

use crate::error::Error;
use crate::tree::{visit, Document, Element, Enter, Flow, Node, Slot, Visitor};

use super::Transform;

enum Strip {
    Keep,
    Remove,
    Replace(String),
}

struct Unprettifier;

impl Visitor for Unprettifier {
    fn visit_text(&mut self, mut slot: Slot<'_>) -> Result<Flow, Error> {
        let strip = match slot.text() {
            Some(text) => {
                let trimmed = text.as_str().trim();
                if trimmed.is_empty() {
                    Strip::Remove
                } else if trimmed.len() != text.len() {
                    Strip::Replace(trimmed.to_string())
                } else {
                    Strip::Keep
                }
            }
            None => Strip::Keep,
        };

        match strip {
            Strip::Keep => (),
            Strip::Remove => {
                slot.remove();
            }
            Strip::Replace(trimmed) => {
                slot.replace(Node::text(trimmed));
            }
        }
        Ok(Flow::Continue)
    }
}

/// Remove formatting whitespace under `root`.
pub fn unprettify(root: &mut Element) -> Result<(), Error> {
    visit(root, &mut Unprettifier)?;
    Ok(())
}

/// Merge runs of consecutive text children of `element` into single nodes.
fn merge_children(element: &mut Element) {
    let children = element.take_children();
    element.extend(children.into_iter().coalesce(|a, b| match (a, b) {
        (Node::Text(a), Node::Text(b)) => {
            let mut merged = a.into_string();
            merged.push_str(b.as_str());
            Ok(Node::text(merged))
        }
        (a, b) => Err((a, b)),
    }));
}

struct StringMerger;

impl Visitor for StringMerger {
    fn enter(&mut self, mut slot: Slot<'_>) -> Result<Enter, Error> {
        if let Some(element) = slot.element_mut() {
            merge_children(element);
        }
        Ok(Enter::Descend)
    }
}

/// Merge consecutive text nodes everywhere under `root` (root included).
pub fn merge_strings(root: &mut Element) -> Result<(), Error> {
    merge_children(root);
    visit(root, &mut StringMerger)?;
    Ok(())
}

/// [Transform] running [unprettify] on the whole document.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unprettify;

impl Transform for Unprettify {
    fn transform(&self, doc: &mut Document) -> Result<(), Error> {
        unprettify(doc.root_mut())
    }
}

/// [Transform] running [merge_strings] on the whole document.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeStrings;

impl Transform for MergeStrings {
    fn transform(&self, doc: &mut Document) -> Result<(), Error> {
        merge_strings(doc.root_mut())
    }
}
