//! Single-pass hotlist state machine

use std::io::BufRead;

use time::UtcOffset;
use tracing::{debug, instrument, trace, warn};

use crate::document::TreeSink;
use crate::error::{Error, ErrorKind, Location, Result};
use crate::opera::date::{self, DateZone};
use crate::opera::line::{strip_terminator, Header, Key, Line};

/// Placeholder written for bookmarks with an empty `URL` field
pub const EMPTY_HREF: &str = "http://";

/// Record kind opened by the most recent header line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    None,
    InFolder,
    InBookmark,
}

/// Importer configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Reject `-` markers that have no folder to close
    pub strict: bool,
    /// Zone for `CREATED` / `VISITED` dates
    pub zone: DateZone,
}

impl ImportOptions {
    pub const fn new(strict: bool, zone: DateZone) -> Self {
        Self { strict, zone }
    }

    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub const fn with_zone(mut self, zone: DateZone) -> Self {
        self.zone = zone;
        self
    }
}

/// Generates `id0`, `id1`, ... in order
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("id{}", self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far
    pub const fn issued(&self) -> u64 {
        self.next
    }
}

/// Drives a [`TreeSink`] from hotlist lines.
///
/// The first line fed is the title; every later line is a header or a field.
/// Headers alone move the state machine:
///
/// | line       | effect (after closing an open bookmark) | next state   |
/// |------------|-----------------------------------------|--------------|
/// | `#FOLDER`  | open `folder`                           | `InFolder`   |
/// | `#URL`     | open `bookmark`                         | `InBookmark` |
/// | `-`        | close innermost folder                  | `None`       |
/// | other      | nothing                                 | `None`       |
///
/// Fields that follow `-` or an unknown header are dropped even inside a
/// folder, so a `#NOTE` can never retitle its enclosing folder.
#[derive(Debug)]
pub struct Importer<S: TreeSink> {
    sink: S,
    options: ImportOptions,
    state: State,
    folder_depth: usize,
    ids: IdGenerator,
    line_number: usize,
    started: bool,
    zone_fallback_logged: bool,
}

impl<S: TreeSink> Importer<S> {
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, ImportOptions::default())
    }

    pub fn with_options(sink: S, options: ImportOptions) -> Self {
        Self {
            sink,
            options,
            state: State::None,
            folder_depth: 0,
            ids: IdGenerator::new(),
            line_number: 0,
            started: false,
            zone_fallback_logged: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn folder_depth(&self) -> usize {
        self.folder_depth
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Import every line of `reader` and return the sink
    #[instrument(skip_all)]
    pub fn import<R: BufRead>(mut self, reader: R) -> Result<S> {
        for line in reader.lines() {
            self.feed_line(&line?)?;
        }
        self.finish()
    }

    /// Process one line; a trailing `\n` or `\r\n` is ignored
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        self.line_number += 1;
        let line = strip_terminator(line);
        self.process(line).map_err(|err| {
            if err.location().is_some() {
                err
            } else {
                err.at(Location::new(self.line_number, line))
            }
        })
    }

    /// End of input. Open records are left as they are.
    pub fn finish(mut self) -> Result<S> {
        if !self.started {
            self.preamble("")?;
        }
        if self.state == State::InBookmark {
            debug!("input ended inside a bookmark record");
        }
        if self.folder_depth > 0 {
            warn!(open = self.folder_depth, "input ended with unclosed folders");
        }
        debug!(
            lines = self.line_number,
            records = self.ids.issued(),
            "hotlist imported"
        );
        Ok(self.sink)
    }

    fn process(&mut self, line: &str) -> Result<()> {
        if !self.started {
            return self.preamble(line);
        }
        match Line::parse(line).map_err(Error::new)? {
            Line::Field { key, name, value } => self.field(key, name, value),
            Line::Header(header) => self.header(header),
        }
    }

    fn preamble(&mut self, title: &str) -> Result<()> {
        self.started = true;
        self.sink.add_text_leaf("title", title)?;

        self.sink.open_element("info");
        self.sink.open_element("metadata");
        self.sink.set_attribute("owner", "Mozilla")?;
        self.sink.set_attribute("SyncPlaces", "true")?;
        self.sink.set_attribute("BookmarksToolbarFolder", "default")?;
        self.sink.close_element()?;
        self.sink.close_element()?;

        self.sink.open_element("folder");
        self.sink.set_attribute("id", "default")?;
        self.sink.close_element()
    }

    fn header(&mut self, header: Header<'_>) -> Result<()> {
        if self.state == State::InBookmark {
            self.sink.close_element()?;
            self.state = State::None;
        }

        match header {
            Header::Folder => {
                self.open_record("folder")?;
                self.folder_depth += 1;
                self.state = State::InFolder;
            }
            Header::Url => {
                self.open_record("bookmark")?;
                self.state = State::InBookmark;
            }
            Header::EndFolder => {
                self.state = State::None;
                if self.folder_depth == 0 {
                    if self.options.strict {
                        return Err(Error::new(ErrorKind::UnmatchedFolderClose));
                    }
                    warn!(
                        line = self.line_number,
                        "ignoring folder close marker with no open folder"
                    );
                } else {
                    self.sink.close_element()?;
                    self.folder_depth -= 1;
                }
            }
            Header::Other(content) => {
                if !content.is_empty() {
                    trace!(line = self.line_number, content, "skipping unknown header");
                }
                self.state = State::None;
            }
        }
        Ok(())
    }

    fn open_record(&mut self, name: &str) -> Result<()> {
        self.sink.open_element(name);
        let id = self.ids.next_id();
        self.sink.set_attribute("id", &id)
    }

    fn field(&mut self, key: Key, name: &str, value: &str) -> Result<()> {
        match (self.state, key) {
            (State::InBookmark | State::InFolder, Key::Name) => {
                self.sink.add_text_leaf("title", value)?;
            }
            (State::InBookmark, Key::Url) => {
                let href = if value.is_empty() { EMPTY_HREF } else { value };
                self.sink.set_attribute("href", href)?;
            }
            (State::InBookmark | State::InFolder, Key::Description) => {
                self.sink.add_text_leaf("desc", &value.replace('\u{2}', " "))?;
            }
            (State::InBookmark | State::InFolder, Key::Created) => {
                let date = self.date(value)?;
                self.sink.set_attribute("added", &date)?;
            }
            (State::InBookmark, Key::Visited) => {
                let date = self.date(value)?;
                self.sink.set_attribute("visited", &date)?;
            }
            (state, _) => {
                trace!(line = self.line_number, ?state, key = name, "skipping field");
            }
        }
        Ok(())
    }

    fn date(&mut self, value: &str) -> Result<String> {
        let secs = date::parse_timestamp(value)?;
        let offset = match self.options.zone {
            DateZone::Fixed(offset) => offset,
            DateZone::Local => self.local_offset(secs),
        };
        date::format_date(secs, offset)
    }

    fn local_offset(&mut self, secs: i64) -> UtcOffset {
        date::local_offset_at(secs).unwrap_or_else(|| {
            if !self.zone_fallback_logged {
                warn!("local UTC offset unavailable, formatting dates in UTC");
                self.zone_fallback_logged = true;
            }
            UtcOffset::UTC
        })
    }
}
