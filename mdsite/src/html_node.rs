//! HTML document tree
//!
//! The tree produced by the markdown pipeline. A node is either a leaf
//! (raw text or a self-contained element) or a parent element that owns
//! its children. Nodes are built bottom-up and serialized once.

use itertools::Itertools;
use thiserror::Error;

/// Elements rendered without a closing tag and without content
pub const VOID_ELEMENTS: [&str; 3] = ["br", "hr", "img"];

/// Structural errors raised while serializing a node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// A parent node was created with an empty tag
    #[error("Parent node must have a tag")]
    MissingTag,

    /// A parent node has no children to render
    #[error("Parent node <{tag}> must have children")]
    MissingChildren {
        /// Tag of the offending parent
        tag: String,
    },

    /// A leaf node that requires content has none
    #[error("Leaf node {} must have a value", describe_leaf(.tag))]
    MissingValue {
        /// Tag of the offending leaf, `None` for raw text
        tag: Option<String>,
    },
}

fn describe_leaf(tag: &Option<String>) -> String {
    match tag {
        Some(tag) => format!("<{tag}>"),
        None => "(text)".to_string(),
    }
}

/// Element attributes, rendered in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Create an empty attribute list
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing the value in place if the key already exists
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder-style variant of [`Attributes::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up an attribute value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `key="value"` pairs joined by single spaces
    ///
    /// An empty attribute list renders as the empty string.
    pub fn to_html(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{key}=\"{value}\""))
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}

/// Raw text or a self-contained element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    /// Element tag, `None` for raw text
    pub tag: Option<String>,

    /// Inner content, `None` when absent (void elements)
    pub content: Option<String>,

    pub attributes: Attributes,
}

impl LeafNode {
    /// Create a raw text leaf
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: None,
            content: Some(content.into()),
            attributes: Attributes::new(),
        }
    }

    /// Create an element leaf with content
    pub fn element(tag: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            content: Some(content.into()),
            attributes: Attributes::new(),
        }
    }

    /// Create a void element (`br`, `hr`, `img`)
    pub fn void(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            content: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    fn is_void(&self) -> bool {
        self.tag
            .as_deref()
            .is_some_and(|tag| VOID_ELEMENTS.contains(&tag))
    }

    /// Serialize the leaf
    ///
    /// # Returns
    /// * `Ok(String)` - Raw text verbatim, a void element without closing tag,
    ///   or `<tag attrs>content</tag>`
    /// * `Err(NodeError::MissingValue)` - Raw text with no content, or a
    ///   non-void element with absent or empty content
    pub fn to_html(&self) -> Result<String, NodeError> {
        let Some(tag) = self.tag.as_deref() else {
            return self
                .content
                .clone()
                .ok_or(NodeError::MissingValue { tag: None });
        };

        if self.is_void() {
            return Ok(format!("<{}>", self.open_tag_body(tag)));
        }

        match self.content.as_deref() {
            Some(content) if !content.is_empty() => {
                Ok(format!("<{}>{content}</{tag}>", self.open_tag_body(tag)))
            }
            _ => Err(NodeError::MissingValue {
                tag: Some(tag.to_string()),
            }),
        }
    }

    fn open_tag_body(&self, tag: &str) -> String {
        if self.attributes.is_empty() {
            tag.to_string()
        } else {
            format!("{tag} {}", self.attributes.to_html())
        }
    }
}

/// An element that owns an ordered list of children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentNode {
    pub tag: String,
    pub children: Vec<Node>,

    /// Carried on the node but never rendered; only leaves emit attributes
    pub attributes: Attributes,
}

impl ParentNode {
    pub fn new(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            tag: tag.into(),
            children,
            attributes: Attributes::new(),
        }
    }

    /// Serialize the element and all of its descendants
    ///
    /// # Returns
    /// * `Ok(String)` - `<tag>` + concatenated children + `</tag>`
    /// * `Err(NodeError)` - Empty tag, no children, or a descendant failed
    pub fn to_html(&self) -> Result<String, NodeError> {
        if self.tag.is_empty() {
            return Err(NodeError::MissingTag);
        }
        if self.children.is_empty() {
            return Err(NodeError::MissingChildren {
                tag: self.tag.clone(),
            });
        }

        let mut html = format!("<{}>", self.tag);
        for child in &self.children {
            html.push_str(&child.to_html()?);
        }
        html.push_str(&format!("</{}>", self.tag));
        Ok(html)
    }
}

/// A node of the HTML document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl Node {
    /// Shorthand for a raw text leaf
    pub fn text(content: impl Into<String>) -> Self {
        Node::Leaf(LeafNode::text(content))
    }

    /// Shorthand for a parent element
    pub fn parent(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Parent(ParentNode::new(tag, children))
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => leaf.tag.as_deref(),
            Node::Parent(parent) => Some(parent.tag.as_str()),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Node::Leaf(leaf) => &leaf.attributes,
            Node::Parent(parent) => &parent.attributes,
        }
    }

    /// Render this node's attributes (`key="value"` pairs)
    pub fn props_to_html(&self) -> String {
        self.attributes().to_html()
    }

    /// Serialize this node and its subtree to an HTML string
    pub fn to_html(&self) -> Result<String, NodeError> {
        match self {
            Node::Leaf(leaf) => leaf.to_html(),
            Node::Parent(parent) => parent.to_html(),
        }
    }
}

impl From<LeafNode> for Node {
    fn from(leaf: LeafNode) -> Self {
        Node::Leaf(leaf)
    }
}

impl From<ParentNode> for Node {
    fn from(parent: ParentNode) -> Self {
        Node::Parent(parent)
    }
}
