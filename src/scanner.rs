//! Line-oriented INI scanning
//!
//! A [`Scanner`] turns INI text into `(section, name, value)` triples and
//! hands each one to an [`EventHandler`] in file order. It reports a single
//! [`ParseOutcome`] once the whole input has been seen (or the scan was
//! stopped early).
//!
//! [`IniScanner`] implements the classic `inih` grammar:
//!
//! ```ini
//! ; start-of-line comment
//! global = keys before any header belong to the "" section
//!
//! [server]
//! host = localhost       ; inline comment
//! port: 8080
//! motd = first line
//!   continued on an indented line
//! ```

use crate::error::ParseOutcome;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// UTF-8 byte order mark, stripped from the first line when allowed
const BOM: char = '\u{FEFF}';

/// Receiver of scanned triples
///
/// Arguments are only borrowed for the duration of the call; implementors
/// copy whatever they keep. Returning `false` marks the current line as an
/// error.
pub trait EventHandler {
    /// Consumes one triple, returning whether it was accepted
    fn ingest(&mut self, section: &str, name: &str, value: &str) -> bool;
}

impl<F> EventHandler for F
where
    F: FnMut(&str, &str, &str) -> bool,
{
    fn ingest(&mut self, section: &str, name: &str, value: &str) -> bool {
        self(section, name, value)
    }
}

/// Source of triples for a store
pub trait Scanner {
    /// Scans in-memory text, calling `handler` once per recognized triple
    fn scan_str(&self, input: &str, handler: &mut dyn EventHandler) -> ParseOutcome;

    /// Reads everything from `reader` and scans it
    ///
    /// A read failure yields [`ParseOutcome::OpenError`] without calling the
    /// handler. Invalid UTF-8 is replaced rather than rejected.
    fn scan_reader(&self, reader: &mut dyn Read, handler: &mut dyn EventHandler) -> ParseOutcome {
        let mut buffer = Vec::new();
        if let Err(err) = reader.read_to_end(&mut buffer) {
            warn!("failed to read INI source: {err}");
            return ParseOutcome::OpenError;
        }
        let text = String::from_utf8_lossy(&buffer);
        self.scan_str(&text, handler)
    }

    /// Opens `path` and scans its contents
    fn scan_file(&self, path: &Path, handler: &mut dyn EventHandler) -> ParseOutcome {
        match File::open(path) {
            Ok(mut file) => self.scan_reader(&mut file, handler),
            Err(err) => {
                warn!("failed to open {}: {err}", path.display());
                ParseOutcome::OpenError
            }
        }
    }
}

/// Grammar switches for [`IniScanner`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerOptions {
    /// Treat indented lines after a `name = value` entry as more values for
    /// the same name
    pub allow_multiline: bool,
    /// Strip a UTF-8 byte order mark at the start of the input
    pub allow_bom: bool,
    /// Characters that start a whole-line comment
    pub start_comment_prefixes: String,
    /// Strip comments that follow whitespace inside a line
    pub allow_inline_comments: bool,
    /// Characters that start an inline comment
    pub inline_comment_prefixes: String,
    /// Accept a bare `name` line and report it with an empty value
    pub allow_no_value: bool,
    /// Stop at the first malformed line instead of scanning to the end
    pub stop_on_first_error: bool,
}

impl ScannerOptions {
    /// Creates options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether indented continuation lines are allowed
    pub fn with_multiline(mut self, allow: bool) -> Self {
        self.allow_multiline = allow;
        self
    }

    /// Sets whether a leading byte order mark is stripped
    pub fn with_bom(mut self, allow: bool) -> Self {
        self.allow_bom = allow;
        self
    }

    /// Sets the whole-line comment prefixes
    pub fn with_start_comment_prefixes(mut self, prefixes: impl Into<String>) -> Self {
        self.start_comment_prefixes = prefixes.into();
        self
    }

    /// Sets whether inline comments are stripped
    pub fn with_inline_comments(mut self, allow: bool) -> Self {
        self.allow_inline_comments = allow;
        self
    }

    /// Sets the inline comment prefixes
    pub fn with_inline_comment_prefixes(mut self, prefixes: impl Into<String>) -> Self {
        self.inline_comment_prefixes = prefixes.into();
        self
    }

    /// Sets whether bare names without a delimiter are accepted
    pub fn with_no_value(mut self, allow: bool) -> Self {
        self.allow_no_value = allow;
        self
    }

    /// Sets whether scanning stops at the first malformed line
    pub fn with_stop_on_first_error(mut self, stop: bool) -> Self {
        self.stop_on_first_error = stop;
        self
    }
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            allow_multiline: true,
            allow_bom: true,
            start_comment_prefixes: ";#".to_string(),
            allow_inline_comments: true,
            inline_comment_prefixes: ";".to_string(),
            allow_no_value: false,
            stop_on_first_error: false,
        }
    }
}

/// The default [`Scanner`]
#[derive(Debug, Clone, Default)]
pub struct IniScanner {
    options: ScannerOptions,
}

impl IniScanner {
    /// Creates a scanner with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scanner with custom options
    pub fn with_options(options: ScannerOptions) -> Self {
        Self { options }
    }

    /// Returns the scanner's options
    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    /// Returns the byte index of the first delimiter or inline comment in
    /// `text`, or `text.len()` if there is neither
    fn find_delimiter_or_comment(&self, text: &str, delimiters: &str) -> usize {
        let mut was_space = false;
        for (index, c) in text.char_indices() {
            if delimiters.contains(c) {
                return index;
            }
            if self.options.allow_inline_comments
                && was_space
                && self.options.inline_comment_prefixes.contains(c)
            {
                return index;
            }
            was_space = c.is_ascii_whitespace();
        }
        text.len()
    }

    /// Drops any inline comment and surrounding whitespace from a value
    fn clean_value<'a>(&self, value: &'a str) -> &'a str {
        let end = self.find_delimiter_or_comment(value, "");
        value[..end].trim_ascii()
    }

    fn is_comment(&self, text: &str) -> bool {
        text.chars()
            .next()
            .is_some_and(|c| self.options.start_comment_prefixes.contains(c))
    }
}

/// Per-scan state carried from line to line
#[derive(Default)]
struct ScanState {
    section: String,
    prev_name: String,
}

impl IniScanner {
    /// Handles one line, returning false when the line is malformed or the
    /// handler rejected its triple
    fn scan_line(
        &self,
        raw: &str,
        state: &mut ScanState,
        handler: &mut dyn EventHandler,
    ) -> bool {
        let line = raw.trim_ascii_end();
        let start = line.trim_ascii_start();
        let indented = start.len() < line.len();

        if start.is_empty() || self.is_comment(start) {
            return true;
        }

        if self.options.allow_multiline && indented && !state.prev_name.is_empty() {
            let value = self.clean_value(start);
            return handler.ingest(&state.section, &state.prev_name, value);
        }

        if let Some(header) = start.strip_prefix('[') {
            let end = self.find_delimiter_or_comment(header, "]");
            if !header[end..].starts_with(']') {
                return false;
            }
            state.section = header[..end].to_string();
            state.prev_name.clear();
            return true;
        }

        let end = self.find_delimiter_or_comment(start, "=:");
        let name = start[..end].trim_ascii_end();

        if end < start.len() && matches!(start.as_bytes()[end], b'=' | b':') {
            let value = self.clean_value(&start[end + 1..]);
            state.prev_name = name.to_string();
            return handler.ingest(&state.section, name, value);
        }

        if self.options.allow_no_value {
            return handler.ingest(&state.section, name, "");
        }

        false
    }
}

impl Scanner for IniScanner {
    fn scan_str(&self, input: &str, handler: &mut dyn EventHandler) -> ParseOutcome {
        let mut state = ScanState::default();
        let mut first_error: Option<usize> = None;

        for (index, raw) in input.lines().enumerate() {
            let line_number = index + 1;
            let raw = if index == 0 && self.options.allow_bom {
                raw.strip_prefix(BOM).unwrap_or(raw)
            } else {
                raw
            };

            if !self.scan_line(raw, &mut state, handler) {
                debug!("syntax error on line {line_number}");
                first_error.get_or_insert(line_number);
                if self.options.stop_on_first_error {
                    break;
                }
            }
        }

        match first_error {
            Some(line) => ParseOutcome::SyntaxError { line },
            None => ParseOutcome::Success,
        }
    }
}
