/*! Converters from simple HTML to other formats.

A [Converter] turns a (filtered) [Document] into text. Converters consume
their input: passes such as header or list removal are applied in place.
!*/
mod text;

use crate::error::Error;
use crate::tree::Document;

pub use text::TextConverter;

pub trait Converter {
    /// Text to write at the beginning of each output file, if any.
    fn header(&self) -> Option<String> {
        None
    }

    /// Append the conversion of `doc` to `out`.
    fn convert_document(&self, doc: &mut Document, out: &mut String) -> Result<(), Error>;

    /// Convert a document.
    ///
    /// Returns an empty string if the conversion only yields whitespace.
    fn convert(&self, mut doc: Document) -> Result<String, Error> {
        let mut out = String::new();
        self.convert_document(&mut doc, &mut out)
            .map_err(|e| e.in_document(doc.title().as_deref()))?;
        if out.trim().is_empty() {
            out.clear();
        }
        Ok(out)
    }
}
