/*! Document tree.

The normalized ("simple HTML") tree every pass operates on,
and the visitor used to walk it.
!*/
mod document;
mod node;
mod validate;
mod visit;

pub use document::Document;
pub use node::{Element, Node, Tag, Text};
pub use validate::validate;
pub use visit::{visit, visit_bounded, Callbacks, Enter, Flow, Slot, Visitor, DEFAULT_MAX_DEPTH};
