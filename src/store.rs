//! The configuration store
//!
//! A [`ConfigStore`] is built in one pass from the triples a [`Scanner`]
//! produces. [`StoreBuilder`] is the ingestion side: it keeps three indexes in
//! step at a single entry point,
//!
//! - values keyed by the case-folded `section.name`,
//! - section names in their original casing,
//! - field names in their original casing, grouped by case-folded section,
//!
//! and is sealed into an immutable store together with the scan's
//! [`ParseOutcome`].

use crate::coerce;
use crate::error::{LoadError, ParseOutcome};
use crate::scanner::{EventHandler, IniScanner, Scanner};
use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use std::io::Read;
use std::path::Path;

/// What happens when the same `section.name` appears more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeyPolicy {
    /// Join every occurrence with a newline, in file order
    #[default]
    Append,
    /// Keep only the last occurrence
    Override,
}

/// Configuration options for building a store
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Behavior when a key is repeated
    pub duplicate_key_policy: DuplicateKeyPolicy,
}

impl StoreConfig {
    /// Creates a store configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duplicate key policy
    pub fn with_duplicate_key_policy(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_key_policy = policy;
        self
    }
}

/// Case-folds a section or field name for lookups
fn fold_case(text: &str) -> String {
    text.to_ascii_lowercase()
}

/// Builds the lookup key for a field: `section.name`, case-folded
fn lookup_key(section: &str, name: &str) -> String {
    let mut key = String::with_capacity(section.len() + name.len() + 1);
    key.push_str(&fold_case(section));
    key.push('.');
    key.push_str(&fold_case(name));
    key
}

/// Accumulates triples into the indexes of a [`ConfigStore`]
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    config: StoreConfig,
    values: IndexMap<String, String>,
    sections: IndexSet<String>,
    fields: IndexMap<String, IndexSet<String>>,
}

impl StoreBuilder {
    /// Creates an empty builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with custom configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Seals the builder into an immutable store
    pub fn finish(self, outcome: ParseOutcome) -> ConfigStore {
        debug!(
            "built config store: {} sections, {} keys ({outcome})",
            self.sections.len(),
            self.values.len()
        );
        ConfigStore {
            outcome,
            values: self.values,
            sections: self.sections,
            fields: self.fields,
        }
    }

    fn store_value(&mut self, key: String, value: &str) {
        match self.config.duplicate_key_policy {
            DuplicateKeyPolicy::Append => {
                let stored = self.values.entry(key).or_default();
                if !stored.is_empty() {
                    stored.push('\n');
                }
                stored.push_str(value);
            }
            DuplicateKeyPolicy::Override => {
                self.values.insert(key, value.to_string());
            }
        }
    }
}

impl EventHandler for StoreBuilder {
    fn ingest(&mut self, section: &str, name: &str, value: &str) -> bool {
        trace!("ingest [{section}] {name} = {value:?}");

        self.store_value(lookup_key(section, name), value);

        if !self.sections.contains(section) {
            self.sections.insert(section.to_string());
        }

        let field_set = self.fields.entry(fold_case(section)).or_default();
        if !field_set.contains(name) {
            field_set.insert(name.to_string());
        }

        true
    }
}

/// Read-only, case-insensitive view of an INI file
///
/// Lookups never fail: a missing or malformed value resolves to the default
/// the caller passes in. Problems with the file itself are reported once,
/// through [`ConfigStore::parse_outcome`].
///
/// ```rust,no_run
/// use ini_reader::ConfigStore;
///
/// let store = ConfigStore::open("settings.ini");
/// if !store.parse_outcome().is_success() {
///     eprintln!("can't load settings.ini: {}", store.parse_error_message());
/// }
/// let port = store.get_integer("server", "port", 8080);
/// let verbose = store.get_boolean("log", "verbose", false);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
    outcome: ParseOutcome,
    values: IndexMap<String, String>,
    sections: IndexSet<String>,
    fields: IndexMap<String, IndexSet<String>>,
}

impl ConfigStore {
    /// Reads and scans the file at `path` with the default scanner
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::open_with(path, &IniScanner::new(), StoreConfig::default())
    }

    /// Reads and scans the file at `path` with a custom scanner and config
    pub fn open_with<P: AsRef<Path>>(path: P, scanner: &dyn Scanner, config: StoreConfig) -> Self {
        let mut builder = StoreBuilder::with_config(config);
        let outcome = scanner.scan_file(path.as_ref(), &mut builder);
        builder.finish(outcome)
    }

    /// Scans INI text held in memory
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, &IniScanner::new(), StoreConfig::default())
    }

    /// Scans INI text with a custom scanner and config
    pub fn parse_with(text: &str, scanner: &dyn Scanner, config: StoreConfig) -> Self {
        let mut builder = StoreBuilder::with_config(config);
        let outcome = scanner.scan_str(text, &mut builder);
        builder.finish(outcome)
    }

    /// Scans everything readable from `reader`
    ///
    /// A read failure produces an empty store with [`ParseOutcome::OpenError`].
    pub fn from_reader<R: Read>(reader: R) -> Self {
        Self::from_reader_with(reader, &IniScanner::new(), StoreConfig::default())
    }

    /// Scans everything readable from `reader` with a custom scanner and config
    pub fn from_reader_with<R: Read>(
        mut reader: R,
        scanner: &dyn Scanner,
        config: StoreConfig,
    ) -> Self {
        let mut builder = StoreBuilder::with_config(config);
        let outcome = scanner.scan_reader(&mut reader, &mut builder);
        builder.finish(outcome)
    }

    /// Returns the terminal outcome of the scan that built this store
    pub fn parse_outcome(&self) -> ParseOutcome {
        self.outcome
    }

    /// Describes the parse outcome in words
    pub fn parse_error_message(&self) -> String {
        self.outcome.to_string()
    }

    /// Returns the store if the scan succeeded
    pub fn check(&self) -> Result<&Self, LoadError> {
        self.outcome.into_result().map(|()| self)
    }

    /// Returns the stored value for `section.name`, if any
    pub fn get_str(&self, section: &str, name: &str) -> Option<&str> {
        self.values
            .get(&lookup_key(section, name))
            .map(String::as_str)
    }

    /// Returns the stored value for `section.name`, or `default`
    pub fn get<'a>(&'a self, section: &str, name: &str, default: &'a str) -> &'a str {
        self.get_str(section, name).unwrap_or(default)
    }

    /// Returns the value as a signed integer (decimal, `0x` hex or
    /// leading-zero octal), or `default` if it doesn't start with one
    pub fn get_integer(&self, section: &str, name: &str, default: i64) -> i64 {
        match coerce::parse_integer(self.get(section, name, "")) {
            (_, 0) => default,
            (value, _) => value,
        }
    }

    /// Returns the value as an unsigned integer, or `default`
    pub fn get_unsigned(&self, section: &str, name: &str, default: u64) -> u64 {
        match coerce::parse_unsigned(self.get(section, name, "")) {
            (_, 0) => default,
            (value, _) => value,
        }
    }

    /// Returns the value as a floating point number, or `default`
    pub fn get_real(&self, section: &str, name: &str, default: f64) -> f64 {
        match coerce::parse_real(self.get(section, name, "")) {
            (_, 0) => default,
            (value, _) => value,
        }
    }

    /// Returns the value as a boolean, or `default`
    ///
    /// `true`, `yes`, `on` and `1` are true; `false`, `no`, `off` and `0` are
    /// false, in any case. Anything else is not a boolean.
    pub fn get_boolean(&self, section: &str, name: &str, default: bool) -> bool {
        coerce::parse_boolean(self.get(section, name, "")).unwrap_or(default)
    }

    /// Returns every section name as first seen in the file
    pub fn sections(&self) -> Vec<&str> {
        self.sections.iter().map(String::as_str).collect()
    }

    /// Returns the field names of `section`, empty if it was never seen
    pub fn fields(&self, section: &str) -> Vec<&str> {
        self.fields
            .get(&fold_case(section))
            .map(|fields| fields.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns true if `section` appeared in the file
    pub fn has_section(&self, section: &str) -> bool {
        let key = fold_case(section);
        self.fields.contains_key(&key) || self.sections.iter().any(|s| fold_case(s) == key)
    }

    /// Returns true if `section.name` has a stored value
    pub fn has_value(&self, section: &str, name: &str) -> bool {
        self.values.contains_key(&lookup_key(section, name))
    }

    /// Returns the number of distinct keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was ingested
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
