//! XBEL data model

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::{DEFAULT_VERSION, ROOT_TAG};

/// XBEL document
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Document {
    pub version: String,
    pub root: Element,
}

impl Document {
    /// Create an empty document whose root carries `version`
    pub fn new(version: impl Into<String>) -> Self {
        let version = version.into();
        let mut root = Element::new(ROOT_TAG);
        root.attributes.insert("version".to_string(), version.clone());
        Self { version, root }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION)
    }
}

/// XML element
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// XML content node
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Element children in document order, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// First child element named `name`
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.elements().find(|element| element.name == name)
    }

    /// Concatenated text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Content::Text(text) => Some(text.as_str()),
                Content::Element(_) => None,
            })
            .collect()
    }

    /// Text of the first child element named `name`
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(Self::text)
    }

    /// All descendant elements, depth first in document order
    pub fn descendants(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }
}

fn collect_descendants<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    for child in element.elements() {
        out.push(child);
        collect_descendants(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, text: &str) -> Element {
        Element {
            name: name.to_string(),
            attributes: IndexMap::new(),
            children: vec![Content::Text(text.to_string())],
        }
    }

    #[test]
    fn test_new_document_has_versioned_root() {
        let doc = Document::new("1.1");
        assert_eq!(doc.root.name, "xbel");
        assert_eq!(doc.root.attribute("version"), Some("1.1"));
        assert!(doc.root.children.is_empty());
    }

    #[test]
    fn test_child_text() {
        let mut folder = Element::new("folder");
        folder.children.push(Content::Element(leaf("title", "News")));
        assert_eq!(folder.child_text("title"), Some("News".to_string()));
        assert_eq!(folder.child_text("desc"), None);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let mut inner = Element::new("folder");
        inner.children.push(Content::Element(Element::new("bookmark")));
        let mut outer = Element::new("xbel");
        outer.children.push(Content::Element(inner));
        outer.children.push(Content::Element(Element::new("separator")));

        let names: Vec<&str> = outer
            .descendants()
            .into_iter()
            .map(|element| element.name.as_str())
            .collect();
        assert_eq!(names, vec!["folder", "bookmark", "separator"]);
    }
}
