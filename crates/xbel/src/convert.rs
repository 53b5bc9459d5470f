//! Hotlist to XBEL conversion

use std::io::{BufRead, Write};

use tracing::{info, instrument};

use crate::document::writer::{self, WriteOptions};
use crate::document::{Builder, Document, DEFAULT_VERSION};
use crate::error::Result;
use crate::opera::{ImportOptions, Importer};

/// Conversion options
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// XBEL version written to the root element and DTD identifiers
    pub version: String,
    pub import: ImportOptions,
    pub write: WriteOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            import: ImportOptions::default(),
            write: WriteOptions::default(),
        }
    }
}

impl ConvertOptions {
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_import(mut self, import: ImportOptions) -> Self {
        self.import = import;
        self
    }

    #[must_use]
    pub fn with_write(mut self, write: WriteOptions) -> Self {
        self.write = write;
        self
    }
}

/// Build the XBEL tree for a hotlist
#[instrument(skip_all, fields(version = options.version.as_str()))]
pub fn import_document<R: BufRead>(reader: R, options: &ConvertOptions) -> Result<Document> {
    let builder = Builder::new(options.version.clone());
    let builder = Importer::with_options(builder, options.import).import(reader)?;
    Ok(builder.finish())
}

/// Convert a hotlist to a compact UTF-8 XBEL document
pub fn convert(input: &str) -> Result<String> {
    let document = import_document(input.as_bytes(), &ConvertOptions::default())?;
    Ok(writer::to_string(&document))
}

/// Convert a hotlist to encoded XBEL bytes
pub fn convert_with_options(input: &str, options: &ConvertOptions) -> Result<Vec<u8>> {
    let document = import_document(input.as_bytes(), options)?;
    Ok(writer::to_bytes(&document, &options.write))
}

/// Read a hotlist from `reader` and write XBEL to `sink`
pub fn convert_to_writer<R: BufRead, W: Write>(
    reader: R,
    sink: &mut W,
    options: &ConvertOptions,
) -> Result<()> {
    let document = import_document(reader, options)?;
    writer::write_document(&document, sink, &options.write)?;
    info!(
        elements = document.root.descendants().len(),
        "conversion finished"
    );
    Ok(())
}
