//! Tree nodes.
//!
//! A [Node] is either an [Element] or a [Text].
//! Elements own their children: moving a node into another element
//! takes it out of its previous parent, so a node can never have two parents
//! and the tree can never contain a cycle.
use std::borrow::Cow;

/// The tag vocabulary of simple HTML.
///
/// Anything that is not part of the normalized format ends up in [Tag::Other],
/// so passes that need to handle every tag can match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Html,
    Head,
    Title,
    Body,
    Section,
    /// `h1`..`h6` (any `h<digits>` really).
    Heading(u8),
    Paragraph,
    /// `ol` when `ordered`, `ul` otherwise.
    List {
        ordered: bool,
    },
    /// `dl`
    DefinitionList,
    ListItem,
    /// `dt`
    Term,
    /// `dd`
    Definition,
    Other(String),
}

impl Tag {
    /// Get the [Tag] for a tag name. Names are case insensitive.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "html" => Tag::Html,
            "head" => Tag::Head,
            "title" => Tag::Title,
            "body" => Tag::Body,
            "section" => Tag::Section,
            "p" => Tag::Paragraph,
            "ol" => Tag::List { ordered: true },
            "ul" => Tag::List { ordered: false },
            "dl" => Tag::DefinitionList,
            "li" => Tag::ListItem,
            "dt" => Tag::Term,
            "dd" => Tag::Definition,
            _ => match heading_level(&lower) {
                Some(level) => Tag::Heading(level),
                None => Tag::Other(lower),
            },
        }
    }

    /// Tag name, lowercased.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Tag::Html => Cow::Borrowed("html"),
            Tag::Head => Cow::Borrowed("head"),
            Tag::Title => Cow::Borrowed("title"),
            Tag::Body => Cow::Borrowed("body"),
            Tag::Section => Cow::Borrowed("section"),
            Tag::Heading(level) => Cow::Owned(format!("h{}", level)),
            Tag::Paragraph => Cow::Borrowed("p"),
            Tag::List { ordered: true } => Cow::Borrowed("ol"),
            Tag::List { ordered: false } => Cow::Borrowed("ul"),
            Tag::DefinitionList => Cow::Borrowed("dl"),
            Tag::ListItem => Cow::Borrowed("li"),
            Tag::Term => Cow::Borrowed("dt"),
            Tag::Definition => Cow::Borrowed("dd"),
            Tag::Other(name) => Cow::Borrowed(name.as_str()),
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Tag::Heading(_))
    }

    /// `ol`, `ul` and `dl`.
    pub fn is_list(&self) -> bool {
        matches!(self, Tag::List { .. } | Tag::DefinitionList)
    }

    /// Tags that get a hierarchical id when exporting.
    pub fn is_identifiable(&self) -> bool {
        matches!(
            self,
            Tag::Section | Tag::List { .. } | Tag::ListItem | Tag::Paragraph | Tag::Heading(_)
        )
    }
}

/// parses the level out of `h<digits>`.
fn heading_level(name: &str) -> Option<u8> {
    let digits = name.strip_prefix('h')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Immutable text payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    content: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn into_string(self) -> String {
        self.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(Text::new(content))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Text content of the node (see [Element::text_content]).
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.as_str().to_string(),
            Node::Element(e) => e.text_content(),
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<Text> for Node {
    fn from(t: Text) -> Self {
        Node::Text(t)
    }
}

/// An element: tag, attributes (unique keys, insertion order kept) and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: Tag,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// New element from a tag name.
    pub fn named(name: &str) -> Self {
        Self::new(Tag::from_name(name))
    }

    /// New element holding a single text child.
    pub fn with_text(tag: Tag, text: impl Into<String>) -> Self {
        let mut e = Self::new(tag);
        e.append(Node::text(text));
        e
    }

    /// Builder-style variant of [Element::append].
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.append(node);
        self
    }

    /// Builder-style variant of [Element::set_attr].
    pub fn attr_with(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn name(&self) -> Cow<'_, str> {
        self.tag.name()
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Set an attribute, returning the previous value.
    /// An existing key keeps its position.
    pub fn set_attr(&mut self, key: &str, value: &str) -> Option<String> {
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => Some(std::mem::replace(v, value.to_string())),
            None => {
                self.attrs.push((key.to_string(), value.to_string()));
                None
            }
        }
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(pos).1)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_vec_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn child_at(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn child_at_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }

    /// Element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// First child element with the given tag.
    pub fn find_child(&self, tag: &Tag) -> Option<&Element> {
        self.child_elements().find(|e| e.tag() == tag)
    }

    pub fn find_child_mut(&mut self, tag: &Tag) -> Option<&mut Element> {
        self.child_elements_mut().find(|e| e.tag() == tag)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// `true` if the element has no children at all.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn append(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Insert `node` at `index`, shifting later children to the right.
    ///
    /// # Panics
    /// if `index > len`.
    pub fn insert(&mut self, index: usize, node: impl Into<Node>) {
        self.children.insert(index, node.into());
    }

    /// Detach the child at `index`. Siblings keep their relative order.
    pub fn remove(&mut self, index: usize) -> Option<Node> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    /// Swap the child at `index` for `node`, returning the old one.
    pub fn replace(&mut self, index: usize, node: impl Into<Node>) -> Option<Node> {
        self.children
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, node.into()))
    }

    /// Detach and return every child.
    pub fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.children.extend(nodes);
    }

    /// Every text descendant concatenated in document order, no separator added.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<&Node> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            match node {
                Node::Text(t) => out.push_str(t.as_str()),
                Node::Element(e) => stack.extend(e.children.iter().rev()),
            }
        }
        out
    }
}
