/*! Simple HTML parsing and serialization.

Documents are parsed with an HTML5 parser, converted into the owned tree
of [crate::tree] (comments and doctypes are dropped), unprettified once and
validated against the document model.

Serialization writes the tree back without any pretty-printing whitespace.
!*/
use std::fmt::Write;

use scraper::{ElementRef, Html};

use crate::error::Error;
use crate::transformers::unprettify;
use crate::tree::{validate, Document, Element, Node, Tag, DEFAULT_MAX_DEPTH};

/// Elements that never have children nor closing tags.
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn convert(element: ElementRef<'_>, depth: usize) -> Result<Element, Error> {
    if depth > DEFAULT_MAX_DEPTH {
        return Err(Error::TooDeep {
            depth: DEFAULT_MAX_DEPTH,
        });
    }

    let value = element.value();
    let mut converted = Element::new(Tag::from_name(value.name()));
    for (key, val) in value.attrs() {
        converted.set_attr(key, val);
    }

    for child in element.children() {
        match child.value() {
            scraper::Node::Text(text) => converted.append(Node::text(&**text)),
            scraper::Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    converted.append(convert(child, depth + 1)?);
                }
            }
            // comments, doctypes, processing instructions
            _ => (),
        }
    }
    Ok(converted)
}

/// Parse a simple HTML string into a normalized [Document].
///
/// Structural errors are tagged with the document title.
pub fn parse(html: &str) -> Result<Document, Error> {
    let parsed = Html::parse_document(html);
    let root = convert(parsed.root_element(), 0)?;
    let mut doc = Document::from_root(root)?;
    unprettify(doc.root_mut())?;
    validate(&mut doc).map_err(|e| e.in_document(doc.title().as_deref()))?;
    Ok(doc)
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

fn write_element(element: &Element, out: &mut String) -> Result<(), Error> {
    let name = element.name();
    write!(out, "<{}", name)?;
    for (key, value) in element.attrs() {
        write!(out, " {}=\"", key)?;
        escape_attr(value, out);
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name.as_ref()) {
        return Ok(());
    }

    for child in element.children() {
        match child {
            Node::Text(text) => escape_text(text.as_str(), out),
            Node::Element(e) => write_element(e, out)?,
        }
    }
    write!(out, "</{}>", name)?;
    Ok(())
}

/// Serialize an element and its subtree.
pub fn element_to_html(element: &Element) -> Result<String, Error> {
    let mut out = String::new();
    write_element(element, &mut out)?;
    Ok(out)
}

/// Serialize a document.
pub fn to_html(doc: &Document) -> Result<String, Error> {
    element_to_html(doc.root())
}
