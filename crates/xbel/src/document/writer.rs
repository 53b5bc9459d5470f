//! XBEL serialization

use std::io::Write;

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, instrument};

use crate::document::model::{Content, Document, Element};
use crate::document::{public_id, system_id, ROOT_TAG};
use crate::encoding;
use crate::error::Result;

/// Serialization options
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Output encoding, named in the XML declaration
    pub encoding: &'static Encoding,
    /// Put nested elements on their own indented lines
    pub pretty: bool,
    /// Indent unit used when `pretty` is set
    pub indent: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            pretty: false,
            indent: "  ".to_string(),
        }
    }
}

impl WriteOptions {
    /// Resolve an encoding label such as `utf-8` or `latin1`
    pub fn with_encoding_label(mut self, label: &str) -> Result<Self> {
        self.encoding = encoding::for_label(label)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Encoding the bytes are actually written in.
    ///
    /// UTF-16 variants have no encoder and are written as UTF-8.
    pub fn output_encoding(&self) -> &'static Encoding {
        self.encoding.output_encoding()
    }
}

/// Serialize `document` to `sink`
#[instrument(skip_all, fields(encoding = options.output_encoding().name()))]
pub fn write_document<W: Write>(
    document: &Document,
    sink: &mut W,
    options: &WriteOptions,
) -> Result<()> {
    let bytes = to_bytes(document, options);
    sink.write_all(&bytes)?;
    sink.flush()?;
    debug!(bytes = bytes.len(), "document written");
    Ok(())
}

/// Serialize `document` into encoded bytes
pub fn to_bytes(document: &Document, options: &WriteOptions) -> Vec<u8> {
    let encoding = options.output_encoding();
    let text = render(document, options, encoding);
    if encoding == UTF_8 {
        return text.into_bytes();
    }
    let (bytes, _, unmappable) = encoding.encode(&text);
    if unmappable {
        debug!(
            encoding = encoding.name(),
            "unmappable characters written as character references"
        );
    }
    bytes.into_owned()
}

/// Serialize `document` as compact UTF-8 text
pub fn to_string(document: &Document) -> String {
    render(document, &WriteOptions::default(), UTF_8)
}

fn render(document: &Document, options: &WriteOptions, encoding: &'static Encoding) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"");
    output.push_str(encoding.name());
    output.push_str("\"?>\n");

    output.push_str("<!DOCTYPE ");
    output.push_str(ROOT_TAG);
    output.push_str(" PUBLIC \"");
    output.push_str(&public_id(&document.version));
    output.push_str("\" \"");
    output.push_str(&system_id(&document.version));
    output.push_str("\">\n");

    let mut writer = ElementWriter { output, options };
    writer.element(&document.root, 0);
    writer.output.push('\n');
    writer.output
}

struct ElementWriter<'a> {
    output: String,
    options: &'a WriteOptions,
}

impl ElementWriter<'_> {
    fn element(&mut self, element: &Element, level: usize) {
        self.output.push('<');
        self.output.push_str(&element.name);

        for (key, value) in element.attributes.iter() {
            self.output.push(' ');
            self.output.push_str(key);
            self.output.push_str("=\"");
            self.output.push_str(&escape_xml(value, true));
            self.output.push('"');
        }

        if element.children.is_empty() {
            self.output.push_str("/>");
            return;
        }

        self.output.push('>');
        let has_text = element
            .children
            .iter()
            .any(|child| matches!(child, Content::Text(_)));
        let nested = self.options.pretty && !has_text;

        for child in &element.children {
            if nested {
                self.newline(level + 1);
            }
            match child {
                Content::Element(child) => self.element(child, level + 1),
                Content::Text(text) => self.output.push_str(&escape_xml(text, false)),
            }
        }

        if nested {
            self.newline(level);
        }
        self.output.push_str("</");
        self.output.push_str(&element.name);
        self.output.push('>');
    }

    fn newline(&mut self, level: usize) {
        self.output.push('\n');
        for _ in 0..level {
            self.output.push_str(&self.options.indent);
        }
    }
}

/// Escape markup characters. Characters XML 1.0 does not allow are written
/// as a space; in attribute values tab, LF and CR become character references
/// so attribute normalization leaves them intact.
fn escape_xml(input: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' if attribute => out.push_str("&#9;"),
            '\n' if attribute => out.push_str("&#10;"),
            '\r' if attribute => out.push_str("&#13;"),
            '\t' | '\n' | '\r' => out.push(ch),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Builder, TreeSink};
    use crate::error::ErrorKind;

    fn sample() -> Result<Document> {
        let mut builder = Builder::new("1.0");
        builder.add_text_leaf("title", "Tom & Jerry's <list>")?;
        builder.open_element("folder");
        builder.set_attribute("id", "id0")?;
        builder.open_element("bookmark");
        builder.set_attribute("href", "http://x/?a=1&b=\"2\"")?;
        builder.add_text_leaf("title", "Café")?;
        builder.close_element()?;
        builder.close_element()?;
        Ok(builder.finish())
    }

    #[test]
    fn test_prolog_and_root() {
        let xml = to_string(&Document::new("1.0"));
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <!DOCTYPE xbel PUBLIC \"+//IDN python.org//DTD XML Bookmark Exchange Language 1.0//EN//XML\" \
             \"http://pyxml.sourceforge.net/topics/dtds/xbel-1.0.dtd\">\n\
             <xbel version=\"1.0\"/>\n"
        );
    }

    #[test]
    fn test_escapes_text_and_attributes() -> Result<()> {
        let xml = to_string(&sample()?);
        assert!(xml.contains("<title>Tom &amp; Jerry&apos;s &lt;list&gt;</title>"));
        assert!(xml.contains("href=\"http://x/?a=1&amp;b=&quot;2&quot;\""));
        Ok(())
    }

    #[test]
    fn test_illegal_characters_become_spaces() -> Result<()> {
        let mut builder = Builder::default();
        builder.add_text_leaf("title", "T\u{1}")?;
        builder.open_element("bookmark");
        builder.set_attribute("href", "http://x/\u{7}\u{ffff}")?;
        builder.add_text_leaf("title", "a\u{2}b")?;
        let xml = to_string(&builder.finish());
        assert!(xml.contains("<title>T </title>"));
        assert!(xml.contains("href=\"http://x/  \""));
        assert!(xml.contains("<title>a b</title>"));
        assert!(!xml.chars().any(|c| c < ' ' && c != '\n'));
        Ok(())
    }

    #[test]
    fn test_attribute_whitespace_is_referenced() -> Result<()> {
        let mut builder = Builder::default();
        builder.open_element("bookmark");
        builder.set_attribute("href", "a\tb\nc\r\nd")?;
        builder.add_text_leaf("desc", "one\ttwo")?;
        let xml = to_string(&builder.finish());
        assert!(xml.contains("href=\"a&#9;b&#10;c&#13;&#10;d\""));
        assert!(xml.contains("<desc>one\ttwo</desc>"));
        Ok(())
    }

    #[test]
    fn test_pretty_output_with_custom_indent() -> Result<()> {
        let options = WriteOptions::default().pretty(true).with_indent("\t");
        let xml = String::from_utf8(to_bytes(&sample()?, &options)).unwrap_or_default();
        assert!(xml.contains("\n\t<folder id=\"id0\">\n\t\t<bookmark"));
        assert!(xml.contains("\n\t\t\t<title>Café</title>\n\t\t</bookmark>"));
        Ok(())
    }

    #[test]
    fn test_pretty_output_indents_nested_elements() -> Result<()> {
        let options = WriteOptions::default().pretty(true);
        let xml = String::from_utf8(to_bytes(&sample()?, &options)).unwrap_or_default();
        assert!(xml.contains("\n  <folder id=\"id0\">\n    <bookmark"));
        assert!(xml.contains("\n      <title>Café</title>\n    </bookmark>"));
        assert!(xml.ends_with("</folder>\n</xbel>\n"));
        Ok(())
    }

    #[test]
    fn test_single_byte_encoding() -> Result<()> {
        let options = WriteOptions::default().with_encoding_label("us-ascii")?;
        let bytes = to_bytes(&sample()?, &options);
        let head = String::from_utf8_lossy(&bytes);
        assert!(head.starts_with("<?xml version=\"1.0\" encoding=\"windows-1252\"?>"));
        // é is 0xE9 in windows-1252
        assert!(bytes.contains(&0xE9));
        Ok(())
    }

    #[test]
    fn test_unmappable_characters_become_references() -> Result<()> {
        let mut builder = Builder::default();
        builder.add_text_leaf("title", "日本")?;
        let options = WriteOptions::default().with_encoding_label("latin1")?;
        let bytes = to_bytes(&builder.finish(), &options);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("<title>&#26085;&#26412;</title>"));
        Ok(())
    }

    #[test]
    fn test_utf16_is_written_as_utf8() -> Result<()> {
        let options = WriteOptions::default().with_encoding_label("utf-16le")?;
        let bytes = to_bytes(&Document::default(), &options);
        assert!(bytes.starts_with(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        Ok(())
    }

    #[test]
    fn test_unknown_encoding_label() {
        let err = WriteOptions::default().with_encoding_label("klingon").err();
        assert_eq!(
            err.map(|e| e.kind().clone()),
            Some(ErrorKind::UnknownEncoding {
                label: "klingon".to_string()
            })
        );
    }

    #[test]
    fn test_write_document_to_sink() -> Result<()> {
        let mut sink = Vec::new();
        write_document(&Document::default(), &mut sink, &WriteOptions::default())?;
        assert!(sink.ends_with(b"<xbel version=\"1.0\"/>\n"));
        Ok(())
    }
}
