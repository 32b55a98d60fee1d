/*! Tree visitor.

Walks a subtree and calls a [Visitor] on every node, so that passes
don't have to reimplement the recursion.

Children are visited right-to-left (highest index first).
Callbacks get a [Slot] on the current child and may remove or replace it:
since only children on the left remain to be visited, their indices
are not invalidated.

For each element child:
1. [Visitor::enter] is called. [Enter::Skip] (or removing the element) means
   its children are not visited and [Visitor::leave] is not called for it.
2. Its children are visited.
3. [Visitor::leave] is called.

Any callback can stop the whole traversal by returning a `Stop` value.
Stopping is a normal outcome, [visit] returns `Ok(Flow::Stop)`.
!*/
use log::debug;

use crate::error::Error;

use super::node::{Element, Node, Text};

/// Maximum nesting depth [visit] accepts before bailing out with [Error::TooDeep].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Result of [Visitor::visit_text] and [Visitor::leave].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Result of [Visitor::enter].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enter {
    /// Visit the children, then call [Visitor::leave].
    Descend,
    /// Do not visit the children, do not call [Visitor::leave].
    Skip,
    /// Stop the traversal.
    Stop,
}

/// Handle on the child currently visited.
///
/// Only the current child can be modified through a slot,
/// which is what keeps right-to-left traversal valid.
pub struct Slot<'a> {
    parent: &'a mut Element,
    index: usize,
    removed: &'a mut bool,
}

impl<'a> Slot<'a> {
    fn new(parent: &'a mut Element, index: usize, removed: &'a mut bool) -> Self {
        Self {
            parent,
            index,
            removed,
        }
    }

    /// Index of the child in its parent.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn parent(&self) -> &Element {
        &*self.parent
    }

    pub fn node(&self) -> &Node {
        &self.parent.children()[self.index]
    }

    pub fn node_mut(&mut self) -> &mut Node {
        &mut self.parent.children_vec_mut()[self.index]
    }

    pub fn element(&self) -> Option<&Element> {
        self.node().as_element()
    }

    pub fn element_mut(&mut self) -> Option<&mut Element> {
        self.node_mut().as_element_mut()
    }

    pub fn text(&self) -> Option<&Text> {
        self.node().as_text()
    }

    /// Detach the current child from its parent and return it.
    pub fn remove(self) -> Node {
        *self.removed = true;
        self.parent.children_vec_mut().remove(self.index)
    }

    /// Put `node` in place of the current child, returning the old one.
    pub fn replace(&mut self, node: impl Into<Node>) -> Node {
        std::mem::replace(self.node_mut(), node.into())
    }
}

/// Callbacks invoked by [visit]. Every method defaults to a no-op.
pub trait Visitor {
    fn visit_text(&mut self, _slot: Slot<'_>) -> Result<Flow, Error> {
        Ok(Flow::Continue)
    }

    fn enter(&mut self, _slot: Slot<'_>) -> Result<Enter, Error> {
        Ok(Enter::Descend)
    }

    fn leave(&mut self, _slot: Slot<'_>) -> Result<Flow, Error> {
        Ok(Flow::Continue)
    }
}

/// Visit the descendants of `root` (not `root` itself).
///
/// Errors raised by callbacks are propagated as is, leaving the tree
/// partially modified.
pub fn visit<V>(root: &mut Element, visitor: &mut V) -> Result<Flow, Error>
where
    V: Visitor + ?Sized,
{
    visit_bounded(root, visitor, DEFAULT_MAX_DEPTH)
}

/// [visit] with a custom depth limit.
pub fn visit_bounded<V>(root: &mut Element, visitor: &mut V, max_depth: usize) -> Result<Flow, Error>
where
    V: Visitor + ?Sized,
{
    let flow = walk(root, visitor, 0, max_depth)?;
    if flow == Flow::Stop {
        debug!("traversal stopped early");
    }
    Ok(flow)
}

fn walk<V>(parent: &mut Element, visitor: &mut V, depth: usize, max_depth: usize) -> Result<Flow, Error>
where
    V: Visitor + ?Sized,
{
    if depth > max_depth {
        return Err(Error::TooDeep { depth: max_depth });
    }

    for index in (0..parent.len()).rev() {
        let mut removed = false;

        if parent.children()[index].is_text() {
            if visitor.visit_text(Slot::new(parent, index, &mut removed))? == Flow::Stop {
                return Ok(Flow::Stop);
            }
            continue;
        }

        match visitor.enter(Slot::new(parent, index, &mut removed))? {
            Enter::Stop => return Ok(Flow::Stop),
            Enter::Skip => continue,
            Enter::Descend if removed => continue,
            Enter::Descend => (),
        }

        // enter may have replaced the element with text
        let flow = match parent.child_at_mut(index) {
            Some(Node::Element(child)) => walk(child, visitor, depth + 1, max_depth)?,
            _ => continue,
        };
        if flow == Flow::Stop {
            return Ok(Flow::Stop);
        }

        if visitor.leave(Slot::new(parent, index, &mut removed))? == Flow::Stop {
            return Ok(Flow::Stop);
        }
    }

    Ok(Flow::Continue)
}

type TextCallback<'a> = Box<dyn FnMut(Slot<'_>) -> Result<Flow, Error> + 'a>;
type EnterCallback<'a> = Box<dyn FnMut(Slot<'_>) -> Result<Enter, Error> + 'a>;

/// Closure-based [Visitor], for one-off traversals.
///
/// ```
/// use zim_corpus::tree::{visit, Callbacks, Element, Flow, Node, Tag};
///
/// let mut root = Element::new(Tag::Paragraph)
///     .child(Node::text("a"))
///     .child(Node::text("b"));
/// let mut seen = Vec::new();
/// let mut callbacks = Callbacks::new().on_text(|slot| {
///     seen.push(slot.index());
///     Ok(Flow::Continue)
/// });
/// visit(&mut root, &mut callbacks).unwrap();
/// drop(callbacks);
/// assert_eq!(seen, vec![1, 0]);
/// ```
#[derive(Default)]
pub struct Callbacks<'a> {
    on_text: Option<TextCallback<'a>>,
    on_enter: Option<EnterCallback<'a>>,
    on_leave: Option<TextCallback<'a>>,
}

impl<'a> Callbacks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_text<F>(mut self, f: F) -> Self
    where
        F: FnMut(Slot<'_>) -> Result<Flow, Error> + 'a,
    {
        self.on_text = Some(Box::new(f));
        self
    }

    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: FnMut(Slot<'_>) -> Result<Enter, Error> + 'a,
    {
        self.on_enter = Some(Box::new(f));
        self
    }

    pub fn on_leave<F>(mut self, f: F) -> Self
    where
        F: FnMut(Slot<'_>) -> Result<Flow, Error> + 'a,
    {
        self.on_leave = Some(Box::new(f));
        self
    }
}

impl Visitor for Callbacks<'_> {
    fn visit_text(&mut self, slot: Slot<'_>) -> Result<Flow, Error> {
        match &mut self.on_text {
            Some(f) => f(slot),
            None => Ok(Flow::Continue),
        }
    }

    fn enter(&mut self, slot: Slot<'_>) -> Result<Enter, Error> {
        match &mut self.on_enter {
            Some(f) => f(slot),
            None => Ok(Enter::Descend),
        }
    }

    fn leave(&mut self, slot: Slot<'_>) -> Result<Flow, Error> {
        match &mut self.on_leave {
            Some(f) => f(slot),
            None => Ok(Flow::Continue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tag;

    fn numbered(n: usize) -> Element {
        (0..n).fold(Element::new(Tag::Section), |s, i| {
            s.child(Element::with_text(Tag::Paragraph, i.to_string()))
        })
    }

    #[test]
    fn right_to_left_pre_and_post_order() {
        let mut root = Element::new(Tag::Body).child(
            Element::new(Tag::Section)
                .child(Element::with_text(Tag::Heading(2), "h"))
                .child(Element::with_text(Tag::Paragraph, "p")),
        );
        let mut events = Vec::new();
        {
            let events = std::cell::RefCell::new(&mut events);
            let mut cb = Callbacks::new()
                .on_text(|slot| {
                    events
                        .borrow_mut()
                        .push(format!("text {}", slot.text().unwrap().as_str()));
                    Ok(Flow::Continue)
                })
                .on_enter(|slot| {
                    events
                        .borrow_mut()
                        .push(format!("enter {}", slot.element().unwrap().name()));
                    Ok(Enter::Descend)
                })
                .on_leave(|slot| {
                    events
                        .borrow_mut()
                        .push(format!("leave {}", slot.element().unwrap().name()));
                    Ok(Flow::Continue)
                });
            visit(&mut root, &mut cb).unwrap();
        }
        assert_eq!(
            events,
            vec![
                "enter section",
                "enter p",
                "text p",
                "leave p",
                "enter h2",
                "text h",
                "leave h2",
                "leave section",
            ]
        );
    }

    #[test]
    fn deleting_every_second_sibling() {
        let mut root = numbered(5);
        let mut seen = Vec::new();
        {
            let mut cb = Callbacks::new().on_enter(|slot| {
                let label = slot.element().unwrap().text_content();
                seen.push(label.clone());
                if slot.index() % 2 == 1 {
                    slot.remove();
                    Ok(Enter::Skip)
                } else {
                    Ok(Enter::Descend)
                }
            });
            visit(&mut root, &mut cb).unwrap();
        }
        // every sibling visited exactly once, right to left
        assert_eq!(seen, vec!["4", "3", "2", "1", "0"]);
        let left: Vec<String> = root.children().iter().map(Node::text_content).collect();
        assert_eq!(left, vec!["0", "2", "4"]);

        // the survivors are each visited once more, in original relative order
        let mut again = Vec::new();
        {
            let mut cb = Callbacks::new().on_enter(|slot| {
                again.push(slot.element().unwrap().text_content());
                Ok(Enter::Skip)
            });
            visit(&mut root, &mut cb).unwrap();
        }
        again.reverse();
        assert_eq!(again, vec!["0", "2", "4"]);
    }

    #[test]
    fn removal_in_enter_skips_leave() {
        let mut root = numbered(3);
        let mut leaves = 0;
        {
            let mut cb = Callbacks::new()
                .on_enter(|slot| {
                    if slot.index() == 1 {
                        slot.remove();
                    }
                    // Descend after a removal is treated as Skip
                    Ok(Enter::Descend)
                })
                .on_leave(|_| {
                    leaves += 1;
                    Ok(Flow::Continue)
                });
            visit(&mut root, &mut cb).unwrap();
        }
        assert_eq!(leaves, 2);
        assert_eq!(root.len(), 2);
    }

    #[test]
    fn skip_does_not_descend() {
        let mut root = numbered(2);
        let mut texts = 0;
        {
            let mut cb = Callbacks::new()
                .on_enter(|_| Ok(Enter::Skip))
                .on_text(|_| {
                    texts += 1;
                    Ok(Flow::Continue)
                });
            visit(&mut root, &mut cb).unwrap();
        }
        assert_eq!(texts, 0);
    }

    #[test]
    fn stop_is_not_an_error() {
        let mut root = numbered(5);
        let mut entered = 0;
        let flow = {
            let mut cb = Callbacks::new().on_enter(|_| {
                entered += 1;
                if entered == 2 {
                    Ok(Enter::Stop)
                } else {
                    Ok(Enter::Skip)
                }
            });
            visit(&mut root, &mut cb).unwrap()
        };
        assert_eq!(flow, Flow::Stop);
        assert_eq!(entered, 2);
    }

    #[test]
    fn stop_from_nested_leave_unwinds() {
        let mut root = Element::new(Tag::Body)
            .child(Element::new(Tag::Section).child(Element::with_text(Tag::Paragraph, "a")))
            .child(Element::new(Tag::Section).child(Element::with_text(Tag::Paragraph, "b")));
        let mut left = Vec::new();
        {
            let mut cb = Callbacks::new().on_leave(|slot| {
                let e = slot.element().unwrap();
                left.push(e.name().into_owned());
                if *e.tag() == Tag::Paragraph {
                    Ok(Flow::Stop)
                } else {
                    Ok(Flow::Continue)
                }
            });
            visit(&mut root, &mut cb).unwrap();
        }
        assert_eq!(left, vec!["p"]);
    }

    #[test]
    fn errors_propagate() {
        let mut root = numbered(2);
        let mut cb = Callbacks::new().on_enter(|_| Err(Error::structural("p", "test")));
        assert!(matches!(
            visit(&mut root, &mut cb),
            Err(Error::StructuralViolation { .. })
        ));
    }

    #[test]
    fn depth_is_bounded() {
        let mut root = Element::new(Tag::Section);
        for _ in 0..10 {
            root = Element::new(Tag::Section).child(root);
        }
        let mut cb = Callbacks::new();
        assert!(matches!(
            visit_bounded(&mut root, &mut cb, 5),
            Err(Error::TooDeep { depth: 5 })
        ));
        let mut cb = Callbacks::new();
        assert_eq!(visit_bounded(&mut root, &mut cb, 20).unwrap(), Flow::Continue);
    }

    #[test]
    fn replace_text_in_place() {
        let mut root = Element::new(Tag::Paragraph).child(Node::text("old"));
        {
            let mut cb = Callbacks::new().on_text(|mut slot| {
                slot.replace(Node::text("new"));
                Ok(Flow::Continue)
            });
            visit(&mut root, &mut cb).unwrap();
        }
        assert_eq!(root.text_content(), "new");
    }
}
