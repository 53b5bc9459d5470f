//! Text encoding helpers

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use tracing::{debug, warn};

use crate::error::{Error, ErrorKind, Result};

/// Look up an encoding by WHATWG label (`utf-8`, `latin1`, `shift_jis`, ...)
pub fn for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        Error::new(ErrorKind::UnknownEncoding {
            label: label.to_string(),
        })
    })
}

/// Decode raw input bytes.
///
/// A byte order mark always wins. Without a `label`, input that is not valid
/// UTF-8 is decoded as Windows-1252, which older hotlists were written in.
pub fn decode_input<'a>(bytes: &'a [u8], label: Option<&str>) -> Result<Cow<'a, str>> {
    if let Some(label) = label {
        let encoding = for_label(label)?;
        let (text, used, malformed) = encoding.decode(bytes);
        if malformed {
            warn!(
                encoding = used.name(),
                "malformed input sequences replaced with U+FFFD"
            );
        }
        return Ok(text);
    }

    let (text, used, malformed) = UTF_8.decode(bytes);
    if !malformed {
        return Ok(text);
    }

    debug!(
        detected = used.name(),
        "input is not valid UTF-8, falling back to windows-1252"
    );
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    Ok(text)
}
