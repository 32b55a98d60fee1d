//! Structural checks on parsed documents.
//!
//! - the root is `html`, and it has a `body`,
//! - `body` only holds sections (no stray text),
//! - `ol`/`ul` only hold `li`, `dl` only holds `dt`/`dd`.
use crate::error::Error;

use super::document::Document;
use super::node::{Element, Node, Tag};
use super::visit::{visit, Enter, Slot, Visitor};

struct Validator;

impl Visitor for Validator {
    fn enter(&mut self, slot: Slot<'_>) -> Result<Enter, Error> {
        if let Some(element) = slot.element() {
            check_children(element)?;
        }
        Ok(Enter::Descend)
    }
}

fn check_children(element: &Element) -> Result<(), Error> {
    let allowed: fn(&Tag) -> bool = match element.tag() {
        Tag::Body => |t| *t == Tag::Section,
        Tag::List { .. } => |t| *t == Tag::ListItem,
        Tag::DefinitionList => |t| matches!(t, Tag::Term | Tag::Definition),
        _ => return Ok(()),
    };

    for child in element.children() {
        match child {
            Node::Text(text) => {
                return Err(Error::Malformed(format!(
                    "text {:?} directly under <{}>",
                    text.as_str(),
                    element.name()
                )))
            }
            Node::Element(e) if !allowed(e.tag()) => {
                return Err(Error::structural(e.name(), element.name()))
            }
            Node::Element(_) => (),
        }
    }
    Ok(())
}

/// Check `doc` against the document model.
///
/// Takes `&mut` because validation uses the (mutating) visitor; the tree is
/// left untouched.
pub fn validate(doc: &mut Document) -> Result<(), Error> {
    if doc.body().is_none() {
        return Err(Error::Malformed("document has no body".to_string()));
    }
    visit(doc.root_mut(), &mut Validator)?;
    Ok(())
}
