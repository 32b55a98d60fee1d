//! Empty subtree removal.
//!
//! An element is empty when it has no children, or when it is a `section`
//! whose children are all headings (a title with no content).
//!
//! Pruning is done post-order: a node is checked after its children,
//! so removing the last child of a parent makes the parent go as well
//! in the same traversal:
//! - `<section><h2>T</h2><ul><li></li></ul></section>`
//! - `li` is empty, removed
//! - `ul` is now empty, removed
//! - `section` only has its heading left, removed
use crate::error::Error;
use crate::tree::{visit, Document, Element, Flow, Node, Slot, Tag, Visitor};

use super::Transform;

/// Tells whether `element` is empty.
pub fn is_empty(element: &Element) -> bool {
    if element.is_leaf() {
        return true;
    }
    *element.tag() == Tag::Section
        && element
            .children()
            .iter()
            .all(|child| matches!(child, Node::Element(e) if e.tag().is_heading()))
}

/// Post-order visitor that removes empty elements.
///
/// Also used by other passes that need cascading removal.
pub(crate) struct Pruner;

impl Visitor for Pruner {
    fn leave(&mut self, slot: Slot<'_>) -> Result<Flow, Error> {
        if slot.element().map_or(false, is_empty) {
            slot.remove();
        }
        Ok(Flow::Continue)
    }
}

/// Remove every empty element under `root`. `root` itself is kept.
pub fn remove_empty(root: &mut Element) -> Result<(), Error> {
    visit(root, &mut Pruner)?;
    Ok(())
}

/// [Transform] running [remove_empty] on the whole document.
///
/// Note that this can remove the `title` (if empty) and the `body` (if all
/// sections were empty).
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveEmpty;

impl Transform for RemoveEmpty {
    fn transform(&self, doc: &mut Document) -> Result<(), Error> {
        remove_empty(doc.root_mut())
    }
}
