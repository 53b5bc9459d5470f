//! Hotlist line classification

use crate::error::ErrorKind;

/// Field keys the importer understands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Name,
    Url,
    Description,
    Created,
    Visited,
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "NAME" => Self::Name,
            "URL" => Self::Url,
            "DESCRIPTION" => Self::Description,
            "CREATED" => Self::Created,
            "VISITED" => Self::Visited,
            _ => Self::Other,
        }
    }
}

/// Record header or structural marker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Header<'a> {
    /// `#FOLDER`
    Folder,
    /// `#URL`
    Url,
    /// `-`, closes the innermost folder
    EndFolder,
    /// Anything else: blank lines, `Options:` lines, `#NOTE`, `#SEPERATOR`, ...
    Other(&'a str),
}

/// A classified hotlist line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    Field {
        key: Key,
        name: &'a str,
        value: &'a str,
    },
    Header(Header<'a>),
}

impl<'a> Line<'a> {
    /// Classify a line whose terminator has already been stripped
    pub fn parse(line: &'a str) -> Result<Self, ErrorKind> {
        let Some(field) = line.strip_prefix('\t') else {
            let header = match line {
                "#FOLDER" => Header::Folder,
                "#URL" => Header::Url,
                "-" => Header::EndFolder,
                other => Header::Other(other),
            };
            return Ok(Self::Header(header));
        };

        let (name, value) = field
            .trim_start_matches('\t')
            .split_once('=')
            .ok_or(ErrorKind::MissingSeparator)?;
        Ok(Self::Field {
            key: Key::from_name(name),
            name,
            value,
        })
    }
}

/// Strip any trailing `\r` and `\n` characters
pub fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
