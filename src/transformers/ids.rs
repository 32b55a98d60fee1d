//! Hierarchical ids for content tags.
//!
//! Sections, lists, list items, paragraphs and headings get an id made of
//! the first letter of their tag name and their 1-based position among all
//! their siblings, prefixed by the id of their parent if it has one:
//! `s1`, `s1-p2`, `s2-u3-l1`...
//!
//! Ids are recomputed from scratch on each call.
use crate::error::Error;
use crate::tree::{visit, Document, Element, Enter, Slot, Visitor};

use super::Transform;

struct IdAssigner;

impl Visitor for IdAssigner {
    fn enter(&mut self, mut slot: Slot<'_>) -> Result<Enter, Error> {
        let id = match slot.element() {
            Some(element) if element.tag().is_identifiable() => {
                let initial = element.name().chars().next().unwrap_or('x');
                let local = format!("{}{}", initial, slot.index() + 1);
                match slot.parent().attr("id") {
                    Some(parent_id) => format!("{}-{}", parent_id, local),
                    None => local,
                }
            }
            _ => return Ok(Enter::Descend),
        };

        if let Some(element) = slot.element_mut() {
            element.set_attr("id", &id);
        }
        Ok(Enter::Descend)
    }
}

/// Assign ids to every content tag under `root`.
pub fn assign_ids(root: &mut Element) -> Result<(), Error> {
    visit(root, &mut IdAssigner)?;
    Ok(())
}

/// [Transform] running [assign_ids] on the whole document.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssignIds;

impl Transform for AssignIds {
    fn transform(&self, doc: &mut Document) -> Result<(), Error> {
        assign_ids(doc.root_mut())
    }
}
