//! Element tree builder

use tracing::trace;

use crate::document::model::{Content, Document, Element};
use crate::document::sink::TreeSink;
use crate::error::{Error, ErrorKind, Result};

/// Position of an element, as child indices from the document root
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(Vec<usize>);

impl NodeHandle {
    pub fn path(&self) -> &[usize] {
        &self.0
    }
}

/// Builds a [`Document`] from a stream of open/close calls.
///
/// Open elements live on a stack and are attached to their parent when
/// closed, so children are always appended in call order.
#[derive(Debug, Default)]
pub struct Builder {
    document: Document,
    open: Vec<Element>,
    path: Vec<usize>,
}

impl Builder {
    /// Create a builder for a document of the given XBEL version
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            document: Document::new(version),
            open: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Look up an element by the handle returned when it was opened
    pub fn element(&self, handle: &NodeHandle) -> Option<&Element> {
        let mut current = &self.document.root;
        let mut via_open = true;
        for (level, &index) in handle.path().iter().enumerate() {
            current = match current.children.get(index) {
                Some(Content::Element(element)) => {
                    via_open = false;
                    element
                }
                Some(Content::Text(_)) => return None,
                None if via_open && index == current.children.len() => self.open.get(level)?,
                None => return None,
            };
        }
        Some(current)
    }

    /// Consume the builder and return the document.
    ///
    /// Elements still open are attached where they were opened.
    pub fn finish(mut self) -> Document {
        while self.close_element().is_ok() {}
        self.document
    }

    fn current_mut(&mut self) -> Result<&mut Element> {
        self.open
            .last_mut()
            .ok_or_else(|| Error::new(ErrorKind::NoOpenElement))
    }

    fn parent_mut(&mut self) -> &mut Element {
        match self.open.last_mut() {
            Some(parent) => parent,
            None => &mut self.document.root,
        }
    }
}

impl TreeSink for Builder {
    type Handle = NodeHandle;

    fn open_element(&mut self, name: &str) -> NodeHandle {
        let index = self.parent_mut().children.len();
        self.path.push(index);
        self.open.push(Element::new(name));
        trace!(name, depth = self.open.len(), "open element");
        NodeHandle(self.path.clone())
    }

    fn close_element(&mut self) -> Result<()> {
        let element = self
            .open
            .pop()
            .ok_or_else(|| Error::new(ErrorKind::CloseWithoutOpen))?;
        self.path.pop();
        trace!(name = element.name.as_str(), depth = self.open.len(), "close element");
        self.parent_mut().children.push(Content::Element(element));
        Ok(())
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        self.current_mut()?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn append_text(&mut self, text: &str) -> Result<()> {
        let current = self.current_mut()?;
        match current.children.last_mut() {
            Some(Content::Text(existing)) => existing.push_str(text),
            _ => current.children.push(Content::Text(text.to_string())),
        }
        Ok(())
    }

    fn depth(&self) -> usize {
        self.open.len()
    }
}
