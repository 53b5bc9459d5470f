//! Opera hotlist importer
//!
//! The hotlist format is line oriented. The first line is the list title.
//! Every other line is either a header (`#FOLDER`, `#URL`, `-`, or anything
//! else that does not start with a tab) or a tab-indented `KEY=value` field
//! belonging to the record opened by the last header.
//!
//! ```text
//! Opera Hotlist version 2.0
//! #FOLDER
//! 	NAME=News
//! 	CREATED=1104537600
//! #URL
//! 	NAME=Example
//! 	URL=http://example.com/
//! -
//! ```

pub mod date;
pub mod importer;
pub mod line;

pub use date::DateZone;
pub use importer::{IdGenerator, ImportOptions, Importer, State};
pub use line::{Header, Key, Line};
