//! xbel - Opera hotlist to XBEL conversion
//!
//! Reads the tab-indented Opera hotlist bookmark export and builds the
//! equivalent XML Bookmark Exchange Language document.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), xbel::Error> {
//! let xml = xbel::convert("My Bookmarks\n#URL\n\tNAME=Example\n\tURL=http://example.com\n")?;
//! assert!(xml.contains("<bookmark id=\"id0\" href=\"http://example.com\">"));
//! assert!(xml.contains("<title>Example</title>"));
//! # Ok(())
//! # }
//! ```
//!
//! The importer only talks to the [`TreeSink`] trait, so the pieces can also
//! be used on their own:
//!
//! ```
//! use xbel::{Builder, Importer, TreeSink};
//! # fn main() -> Result<(), xbel::Error> {
//! let mut importer = Importer::new(Builder::new("1.0"));
//! importer.feed_line("Hotlist")?;
//! importer.feed_line("#FOLDER")?;
//! importer.feed_line("\tNAME=Sub")?;
//! importer.feed_line("-")?;
//! let builder = importer.finish()?;
//! assert_eq!(builder.depth(), 0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Category, Error, ErrorKind, Location, Result};

pub mod document;
pub use document::{Builder, Content, Document, Element, NodeHandle, TreeSink, WriteOptions};

pub mod opera;
pub use opera::{DateZone, ImportOptions, Importer, State};

pub mod encoding;
pub use encoding::decode_input;

pub mod convert;
pub use convert::{convert, convert_to_writer, convert_with_options, import_document, ConvertOptions};
