//! Tree construction interface driven by importers

use crate::error::Result;

/// Receiver of element-tree construction calls.
///
/// Importers only talk to this trait, so they can be exercised against a
/// recording sink instead of a real [`Builder`](super::Builder). Every method
/// except [`open_element`](Self::open_element) acts on the innermost open
/// element.
pub trait TreeSink {
    /// Reference to an element created through this sink
    type Handle;

    /// Append a new element to the current open element (or the root) and
    /// make it the current one
    fn open_element(&mut self, name: &str) -> Self::Handle;

    /// Close the current open element
    fn close_element(&mut self) -> Result<()>;

    /// Set an attribute on the current open element, replacing any previous value
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<()>;

    /// Append text content to the current open element
    fn append_text(&mut self, text: &str) -> Result<()>;

    /// Number of currently open elements
    fn depth(&self) -> usize;

    /// Open `name`, give it `text` as content, and close it again
    fn add_text_leaf(&mut self, name: &str, text: &str) -> Result<Self::Handle> {
        let handle = self.open_element(name);
        self.append_text(text)?;
        self.close_element()?;
        Ok(handle)
    }

    /// Open and immediately close `name`
    fn add_empty_element(&mut self, name: &str) -> Result<Self::Handle> {
        let handle = self.open_element(name);
        self.close_element()?;
        Ok(handle)
    }
}
