//! XBEL document tree, builder and writer

pub mod builder;
pub mod model;
pub mod sink;
pub mod writer;

pub use builder::{Builder, NodeHandle};
pub use model::{Content, Document, Element};
pub use sink::TreeSink;
pub use writer::{write_document, WriteOptions};

/// Root tag of every XBEL document
pub const ROOT_TAG: &str = "xbel";

/// Default XBEL DTD version
pub const DEFAULT_VERSION: &str = "1.0";

/// Public identifier of the XBEL DTD for `version`
pub fn public_id(version: &str) -> String {
    format!("+//IDN python.org//DTD XML Bookmark Exchange Language {version}//EN//XML")
}

/// System identifier of the XBEL DTD for `version`
pub fn system_id(version: &str) -> String {
    format!("http://pyxml.sourceforge.net/topics/dtds/xbel-{version}.dtd")
}
