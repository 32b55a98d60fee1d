//! Transform trait.

use crate::error::Error;
use crate::tree::Document;

/// A pass over a [Document].
///
/// Passes mutate the tree in place. On error the tree is left
/// partially transformed and should be discarded.
pub trait Transform {
    fn transform(&self, doc: &mut Document) -> Result<(), Error>;

    /// Takes ownership of [Document] and returns it.
    fn transform_own(&self, mut doc: Document) -> Result<Document, Error> {
        self.transform(&mut doc)?;
        Ok(doc)
    }
}
