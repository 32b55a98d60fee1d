//! Simple HTML documents.
//!
//! A [Document] is an `html` element holding a `head` (with a `title`)
//! and a `body` made of top-level `section`s.
//!
//! Passes may remove the `body` altogether (e.g. when every section gets pruned),
//! hence the [Option]s in the accessors.
use crate::error::Error;
use crate::transformers::section_title;

use super::node::{Element, Node, Tag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Create an empty document with the given title.
    ///
    /// An empty title yields an empty `title` element.
    pub fn new(title: &str) -> Self {
        let mut title_elem = Element::new(Tag::Title);
        if !title.is_empty() {
            title_elem.append(Node::text(title));
        }
        let head = Element::new(Tag::Head).child(title_elem);
        let root = Element::new(Tag::Html)
            .child(head)
            .child(Element::new(Tag::Body));
        Self { root }
    }

    /// Wrap an existing tree. The root has to be an `html` element.
    pub fn from_root(root: Element) -> Result<Self, Error> {
        if *root.tag() != Tag::Html {
            return Err(Error::Malformed(format!(
                "root element is <{}>, not <html>",
                root.name()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    pub fn head(&self) -> Option<&Element> {
        self.root.find_child(&Tag::Head)
    }

    pub fn body(&self) -> Option<&Element> {
        self.root.find_child(&Tag::Body)
    }

    pub fn body_mut(&mut self) -> Option<&mut Element> {
        self.root.find_child_mut(&Tag::Body)
    }

    /// Trimmed text of `head > title`, if there is one.
    pub fn title(&self) -> Option<String> {
        self.head()
            .and_then(|head| head.find_child(&Tag::Title))
            .map(|title| title.text_content().trim().to_string())
    }

    /// Title for reporting purposes: the title if not empty, `untitled` otherwise.
    pub fn display_title(&self) -> String {
        match self.title() {
            Some(t) if !t.is_empty() => t,
            _ => "untitled".to_string(),
        }
    }

    /// Append a top-level section.
    pub fn push_section(&mut self, section: Element) -> Result<(), Error> {
        match self.body_mut() {
            Some(body) => {
                body.append(section);
                Ok(())
            }
            None => Err(Error::Malformed("document has no body".to_string())),
        }
    }

    /// Top-level sections, in document order.
    pub fn sections(&self) -> impl Iterator<Item = &Element> {
        self.body()
            .into_iter()
            .flat_map(|body| body.child_elements())
            .filter(|e| *e.tag() == Tag::Section)
    }

    /// Every section, nested ones included, from the end of the document:
    /// the last section comes first, and subsections come before their parent.
    pub fn sections_backwards(&self) -> Vec<&Element> {
        fn collect<'a>(parent: &'a Element, out: &mut Vec<&'a Element>) {
            for child in parent.child_elements().collect::<Vec<_>>().into_iter().rev() {
                if *child.tag() == Tag::Section {
                    collect(child, out);
                    out.push(child);
                }
            }
        }

        let mut out = Vec::new();
        if let Some(body) = self.body() {
            collect(body, &mut out);
        }
        out
    }

    /// Split the document into one document per section.
    ///
    /// Nested sections are detached from their parents and become documents of
    /// their own, in document order. Each document is titled after the section
    /// heading; title-less sections yield untitled documents.
    pub fn into_section_documents(self) -> Vec<Document> {
        fn split(mut section: Element, out: &mut Vec<Document>) {
            let (nested, kept): (Vec<Node>, Vec<Node>) = section
                .take_children()
                .into_iter()
                .partition(|n| matches!(n, Node::Element(e) if *e.tag() == Tag::Section));
            section.extend(kept);

            let title = section_title(&section).unwrap_or_default();
            let mut doc = Document::new(&title);
            if let Some(body) = doc.body_mut() {
                body.append(section);
            }
            out.push(doc);

            for node in nested {
                if let Node::Element(e) = node {
                    split(e, out);
                }
            }
        }

        let mut root = self.root;
        let mut out = Vec::new();
        if let Some(body) = root.find_child_mut(&Tag::Body) {
            for node in body.take_children() {
                match node {
                    Node::Element(e) if *e.tag() == Tag::Section => split(e, &mut out),
                    _ => (),
                }
            }
        }
        out
    }
}

impl Default for Document {
    /// Untitled, empty document.
    fn default() -> Self {
        Self::new("")
    }
}
