//! Error types for xbel

use std::fmt;
use thiserror::Error;

/// Input line an error was raised on
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    /// 1-based line number
    pub line: usize,
    /// Line content with its terminator stripped
    pub content: String,
}

impl Location {
    pub fn new(line: usize, content: impl Into<String>) -> Self {
        Self {
            line,
            content: content.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} ({:?})", self.line, self.content)
    }
}

/// Broad class of an [`ErrorKind`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Builder invariant violated; points at a bug in the caller
    Structure,
    /// Input could not be interpreted
    DataFormat,
    /// Unusable option value
    Config,
    /// Reading or writing failed
    Io,
}

/// Error kind for detailed categorization
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("close without matching open element")]
    CloseWithoutOpen,
    #[error("no open element")]
    NoOpenElement,
    #[error("invalid timestamp: {value:?}")]
    InvalidTimestamp { value: String },
    #[error("missing '=' separator in field line")]
    MissingSeparator,
    #[error("folder close marker without open folder")]
    UnmatchedFolderClose,
    #[error("unknown encoding: {label:?}")]
    UnknownEncoding { label: String },
    #[error("i/o error: {message}")]
    Io { message: String },
}

impl ErrorKind {
    pub const fn category(&self) -> Category {
        match self {
            Self::CloseWithoutOpen | Self::NoOpenElement => Category::Structure,
            Self::InvalidTimestamp { .. } | Self::MissingSeparator | Self::UnmatchedFolderClose => {
                Category::DataFormat
            }
            Self::UnknownEncoding { .. } => Category::Config,
            Self::Io { .. } => Category::Io,
        }
    }
}

/// Main error type for xbel
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    location: Option<Location>,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            location: None,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: None,
            message: message.into(),
        }
    }

    /// Attach the offending input line
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub const fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "error at {location}: {}", self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            message: err.to_string(),
        })
    }
}

/// Result type alias for xbel
pub type Result<T> = std::result::Result<T, Error>;
