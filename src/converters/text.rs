//! Plain text, one paragraph per line, documents separated by an empty line.
//!
//! Headings and lists are dropped by default. When kept, headings are
//! printed on their own line, and list items one per line, with an optional
//! bullet (or number, for ordered lists) and indentation for nested lists.
use std::fmt::Write;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;
use crate::transformers::{matches, remove_tags};
use crate::tree::{Document, Element, Node, Tag};

use super::Converter;

lazy_static! {
    static ref LIST_TAGS: Regex = Regex::new(r"^(?:ol|ul|li|dl|dt|dd)$").unwrap();
    static ref HEADING_TAGS: Regex = Regex::new(r"^h[0-9]+$").unwrap();
    static ref LIST_AND_HEADING_TAGS: Regex =
        Regex::new(r"^(?:ol|ul|li|dl|dt|dd|h[0-9]+)$").unwrap();
}

#[derive(Debug, Clone)]
pub struct TextConverter {
    removed: Option<&'static Regex>,
    bullet: Option<String>,
    indent: usize,
}

impl Default for TextConverter {
    fn default() -> Self {
        Self {
            removed: None,
            bullet: None,
            indent: 0,
        }
        .keeping(false, false)
    }
}

impl TextConverter {
    /// Converter keeping the headings and/or lists of documents.
    pub fn new(headers: bool, lists: bool) -> Self {
        Self::default().keeping(headers, lists)
    }

    fn keeping(mut self, headers: bool, lists: bool) -> Self {
        self.removed = match (headers, lists) {
            (true, true) => None,
            (true, false) => Some(&*LIST_TAGS),
            (false, true) => Some(&*HEADING_TAGS),
            (false, false) => Some(&*LIST_AND_HEADING_TAGS),
        };
        self
    }

    /// Prefix list items with `bullet` (numbers for ordered lists).
    pub fn with_bullet(mut self, bullet: &str) -> Self {
        self.bullet = Some(bullet.to_string());
        self
    }

    /// Indent nested lists by `indent` spaces per level.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    fn convert_section(&self, section: &Element, out: &mut String) -> Result<(), Error> {
        for child in section.children() {
            let child = match child {
                Node::Element(e) => e,
                Node::Text(_) => {
                    return Err(Error::Malformed(format!(
                        "text directly under <{}>",
                        section.name()
                    )))
                }
            };
            match child.tag() {
                Tag::Heading(_) | Tag::Paragraph => writeln!(out, "{}", child.text_content())?,
                Tag::List { .. } | Tag::DefinitionList => self.convert_list(child, out, 0)?,
                Tag::Section => self.convert_section(child, out)?,
                _ => return Err(Error::structural(child.name(), section.name())),
            }
        }
        Ok(())
    }

    /// `level` is the nesting level of the list, 0 for top-level lists.
    fn convert_list(&self, list: &Element, out: &mut String, level: usize) -> Result<(), Error> {
        let ordered = matches!(list.tag(), Tag::List { ordered: true });
        for (position, child) in list.children().iter().enumerate() {
            match child {
                Node::Element(item) => match (list.tag(), item.tag()) {
                    (Tag::List { .. }, Tag::ListItem) => {
                        let index = if ordered { position + 1 } else { 0 };
                        self.convert_item(item, out, level, index)?
                    }
                    (Tag::DefinitionList, Tag::Term | Tag::Definition) => {
                        self.convert_item(item, out, level, 0)?
                    }
                    _ => return Err(Error::structural(item.name(), list.name())),
                },
                Node::Text(_) => {
                    return Err(Error::Malformed(format!(
                        "text directly under <{}>",
                        list.name()
                    )))
                }
            }
        }
        Ok(())
    }

    /// `index` is the 1-based position of the item in an ordered list, 0 otherwise.
    fn convert_item(
        &self,
        item: &Element,
        out: &mut String,
        level: usize,
        index: usize,
    ) -> Result<(), Error> {
        for child in item.children() {
            match child {
                Node::Text(text) => {
                    let bullet = match &self.bullet {
                        Some(_) if index > 0 => format!("{}. ", index),
                        Some(bullet) => format!("{} ", bullet),
                        None => String::new(),
                    };
                    writeln!(
                        out,
                        "{}{}{}",
                        " ".repeat(self.indent * level),
                        bullet,
                        text.as_str()
                    )?;
                }
                Node::Element(e) if matches!(e.tag(), Tag::List { .. } | Tag::DefinitionList) => {
                    self.convert_list(e, out, level + 1)?
                }
                Node::Element(e) => return Err(Error::structural(e.name(), item.name())),
            }
        }
        Ok(())
    }
}

impl Converter for TextConverter {
    fn convert_document(&self, doc: &mut Document, out: &mut String) -> Result<(), Error> {
        if let Some(removed) = self.removed {
            remove_tags(doc.root_mut(), matches(removed))?;
        }
        if let Some(body) = doc.body() {
            for child in body.child_elements() {
                match child.tag() {
                    Tag::Section => self.convert_section(child, out)?,
                    _ => return Err(Error::structural(child.name(), "body")),
                }
            }
        }
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        let mut doc = Document::new("Paris");
        doc.push_section(
            Element::new(Tag::Section)
                .child(Element::with_text(Tag::Heading(2), "History"))
                .child(Element::with_text(Tag::Paragraph, "Old city."))
                .child(
                    Element::new(Tag::List { ordered: true })
                        .child(Element::with_text(Tag::ListItem, "first"))
                        .child(
                            Element::new(Tag::ListItem).child(Node::text("second")).child(
                                Element::new(Tag::List { ordered: false })
                                    .child(Element::with_text(Tag::ListItem, "nested")),
                            ),
                        ),
                )
                .child(
                    Element::new(Tag::Section)
                        .child(Element::with_text(Tag::Heading(3), "Sub"))
                        .child(Element::with_text(Tag::Paragraph, "More.")),
                ),
        )
        .unwrap();
        doc
    }

    #[test]
    fn removed_tags() {
        let removed = |c: &TextConverter, tag: &str| c.removed.map_or(false, |r| r.is_match(tag));

        let all = TextConverter::default();
        assert!(removed(&all, "h2") && removed(&all, "li") && removed(&all, "dd"));
        assert!(!removed(&all, "p") && !removed(&all, "html"));

        let lists = TextConverter::new(true, false);
        assert!(removed(&lists, "ul") && !removed(&lists, "h3"));

        let headings = TextConverter::new(false, true);
        assert!(removed(&headings, "h10") && !removed(&headings, "ol"));

        assert!(TextConverter::new(true, true).removed.is_none());
    }

    #[test]
    fn default_drops_headers_and_lists() {
        let text = TextConverter::default().convert(doc()).unwrap();
        assert_eq!(text, "Old city.\nMore.\n\n");
    }

    #[test]
    fn headers_and_lists() {
        let text = TextConverter::new(true, true)
            .with_bullet("*")
            .with_indent(2)
            .convert(doc())
            .unwrap();
        assert_eq!(
            text,
            "History\nOld city.\n1. first\n2. second\n  * nested\nSub\nMore.\n\n"
        );
    }

    #[test]
    fn lists_without_bullets() {
        let text = TextConverter::new(false, true).convert(doc()).unwrap();
        assert_eq!(text, "Old city.\nfirst\nsecond\nnested\nMore.\n\n");
    }

    #[test]
    fn whitespace_only_output_is_empty() {
        assert_eq!(TextConverter::default().convert(Document::new("x")).unwrap(), "");

        // only a list, which is removed along with its section
        let mut d = Document::new("x");
        d.push_section(
            Element::new(Tag::Section)
                .child(Element::with_text(Tag::Heading(2), "h"))
                .child(Element::new(Tag::List { ordered: false }).child(Element::with_text(Tag::ListItem, "a"))),
        )
        .unwrap();
        assert_eq!(TextConverter::default().convert(d).unwrap(), "");
    }

    #[test]
    fn unexpected_tag_in_list() {
        let mut d = Document::new("bad");
        d.push_section(
            Element::new(Tag::Section).child(
                Element::new(Tag::List { ordered: false })
                    .child(Element::with_text(Tag::Paragraph, "not an item")),
            ),
        )
        .unwrap();
        let err = TextConverter::new(true, true).convert(d).unwrap_err();
        match err {
            Error::Document { title, source } => {
                assert_eq!(title, "bad");
                assert!(matches!(*source, Error::StructuralViolation { .. }));
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn unexpected_tag_in_section() {
        let mut d = Document::new("bad");
        d.push_section(
            Element::new(Tag::Section).child(Element::with_text(Tag::Other("table".to_string()), "x")),
        )
        .unwrap();
        assert!(TextConverter::default().convert(d).is_err());
    }
}
