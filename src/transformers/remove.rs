//! Tag removal.
//!
//! Removes every element (with its subtree) matched by a predicate,
//! then everything that became empty as a result (see [super::prune]).
//!
//! Predicates get the index of the element in its parent and the element itself.
//! [in_set] and [matches] cover the usual cases.
use std::collections::HashSet;

use log::debug;
use regex::Regex;

use crate::error::Error;
use crate::tree::{visit, Document, Element, Enter, Flow, Slot, Visitor};

use super::prune::Pruner;
use super::Transform;

struct TagRemover<P> {
    predicate: P,
    removed: usize,
}

impl<P> Visitor for TagRemover<P>
where
    P: FnMut(usize, &Element) -> bool,
{
    fn enter(&mut self, slot: Slot<'_>) -> Result<Enter, Error> {
        let matched = match slot.element() {
            Some(element) => (self.predicate)(slot.index(), element),
            None => false,
        };
        if matched {
            slot.remove();
            self.removed += 1;
            Ok(Enter::Skip)
        } else {
            Ok(Enter::Descend)
        }
    }

    fn leave(&mut self, slot: Slot<'_>) -> Result<Flow, Error> {
        Pruner.leave(slot)
    }
}

/// Remove the elements under `root` for which `predicate` is `true`,
/// along with the elements emptied by the removal.
///
/// Returns the number of matched elements.
pub fn remove_tags<P>(root: &mut Element, predicate: P) -> Result<usize, Error>
where
    P: FnMut(usize, &Element) -> bool,
{
    let mut remover = TagRemover {
        predicate,
        removed: 0,
    };
    visit(root, &mut remover)?;
    if remover.removed > 0 {
        debug!("removed {} elements", remover.removed);
    }
    Ok(remover.removed)
}

/// Predicate matching elements whose name is in `names`.
pub fn in_set(names: &HashSet<String>) -> impl Fn(usize, &Element) -> bool + '_ {
    move |_, element| names.contains(element.name().as_ref())
}

/// Predicate matching elements whose name is matched by `pattern`,
/// the match being anchored at the start of the name.
pub fn matches(pattern: &Regex) -> impl Fn(usize, &Element) -> bool + '_ {
    move |_, element| {
        pattern
            .find(element.name().as_ref())
            .map_or(false, |m| m.start() == 0)
    }
}

/// What [RemoveTags] removes.
#[derive(Debug, Clone)]
pub enum TagMatcher {
    Names(HashSet<String>),
    Pattern(Regex),
}

/// [Transform] running [remove_tags] on the whole document.
#[derive(Debug, Clone)]
pub struct RemoveTags {
    matcher: TagMatcher,
}

impl RemoveTags {
    pub fn new(matcher: TagMatcher) -> Self {
        Self { matcher }
    }

    /// Remove tags by name.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(TagMatcher::Names(names.into_iter().map(Into::into).collect()))
    }

    /// Remove tags by pattern (see [matches]).
    pub fn pattern(pattern: Regex) -> Self {
        Self::new(TagMatcher::Pattern(pattern))
    }
}

impl Transform for RemoveTags {
    fn transform(&self, doc: &mut Document) -> Result<(), Error> {
        match &self.matcher {
            TagMatcher::Names(names) => remove_tags(doc.root_mut(), in_set(names))?,
            TagMatcher::Pattern(pattern) => remove_tags(doc.root_mut(), matches(pattern))?,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Node, Tag};

    fn sample() -> Element {
        Element::new(Tag::Body)
            .child(
                Element::new(Tag::Section)
                    .child(Element::with_text(Tag::Heading(2), "Lists"))
                    .child(
                        Element::new(Tag::List { ordered: false })
                            .child(Element::with_text(Tag::ListItem, "only item")),
                    ),
            )
            .child(
                Element::new(Tag::Section)
                    .child(Element::with_text(Tag::Heading(2), "Text"))
                    .child(Element::with_text(Tag::Paragraph, "para"))
                    .child(
                        Element::new(Tag::List { ordered: true })
                            .child(Element::with_text(Tag::ListItem, "a"))
                            .child(Element::with_text(Tag::ListItem, "b")),
                    ),
            )
    }

    #[test]
    fn no_match_leaves_tree_unchanged() {
        let original = sample();
        let mut tree = original.clone();
        let removed = remove_tags(&mut tree, |_, e| e.name() == "table").unwrap();
        assert_eq!(removed, 0);
        assert_eq!(tree, original);
    }

    #[test]
    fn removing_the_only_item_cascades_to_section() {
        let mut tree = sample();
        remove_tags(&mut tree, |_, e| e.text_content() == "only item" && *e.tag() == Tag::ListItem)
            .unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.text_content(), "Textparaab");
    }

    #[test]
    fn subtree_is_not_visited() {
        let mut tree = sample();
        let mut seen = Vec::new();
        remove_tags(&mut tree, |_, e| {
            seen.push(e.name().into_owned());
            e.tag().is_list()
        })
        .unwrap();
        assert!(!seen.contains(&"li".to_string()));
        // first section is gone, the second one keeps its paragraph
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.text_content(), "Textpara");
    }

    #[test]
    fn by_index() {
        let mut list = Element::new(Tag::List { ordered: true })
            .child(Element::with_text(Tag::ListItem, "0"))
            .child(Element::with_text(Tag::ListItem, "1"))
            .child(Element::with_text(Tag::ListItem, "2"));
        remove_tags(&mut list, |idx, _| idx == 1).unwrap();
        assert_eq!(list.text_content(), "02");
    }

    #[test]
    fn predicate_in_set() {
        let names: HashSet<String> = ["ol", "ul"].iter().map(|s| s.to_string()).collect();
        let mut tree = sample();
        remove_tags(&mut tree, in_set(&names)).unwrap();
        assert_eq!(tree.text_content(), "Textpara");
    }

    #[test]
    fn predicate_matches_is_anchored() {
        let pattern = Regex::new("h[0-9]+").unwrap();
        let mut tree = sample();
        remove_tags(&mut tree, matches(&pattern)).unwrap();
        assert_eq!(tree.text_content(), "only itemparaab");

        // "th" contains "h" but does not start with it
        let pattern = Regex::new("h").unwrap();
        let mut e = Element::new(Tag::Body).child(
            Element::new(Tag::Other("th".to_string())).child(Node::text("cell")),
        );
        remove_tags(&mut e, matches(&pattern)).unwrap();
        assert_eq!(e.len(), 1);
    }

    #[test]
    fn transform_on_document() {
        let mut doc = Document::new("t");
        for section in sample().take_children() {
            if let Node::Element(s) = section {
                doc.push_section(s).unwrap();
            }
        }
        RemoveTags::names(["ol", "ul", "li"]).transform(&mut doc).unwrap();
        assert_eq!(doc.sections().count(), 1);
    }
}
