//! # INI Reader
//!
//! Read INI files into a case-insensitive, read-only configuration store with
//! typed accessors.
//!
//! ## Overview
//!
//! A scanner walks the file line by line and reports every
//! `(section, name, value)` triple it recognizes. The store indexes those
//! triples once and then answers lookups:
//!
//! - **Case-insensitive lookups**: `Server.Port` and `server.port` are the same key
//! - **Case-preserving enumeration**: sections and field names keep the casing
//!   they were first written with
//! - **Typed getters**: integers (decimal, hex, octal), reals and booleans
//! - **Defaults instead of errors**: a missing or malformed value resolves to
//!   the default passed by the caller
//! - **Repeated keys accumulate**: each occurrence is appended on a new line
//!
//! ## Basic Usage
//!
//! ```rust
//! use ini_reader::{ConfigStore, ParseOutcome};
//!
//! let store = ConfigStore::parse(
//!     "[Server]\n\
//!      host = example.com\n\
//!      port = 0x1F90\n\
//!      debug = yes\n",
//! );
//!
//! assert_eq!(store.parse_outcome(), ParseOutcome::Success);
//! assert_eq!(store.get("server", "HOST", "localhost"), "example.com");
//! assert_eq!(store.get_integer("server", "port", 80), 8080);
//! assert!(store.get_boolean("server", "debug", false));
//! assert_eq!(store.get_real("server", "ratio", 0.5), 0.5);
//! assert_eq!(store.sections(), vec!["Server"]);
//! ```
//!
//! ## Error Handling
//!
//! Problems with the file are reported once, when the store is built:
//!
//! ```rust
//! use ini_reader::{ConfigStore, LoadError, ParseOutcome};
//!
//! let store = ConfigStore::parse("[a]\nx = 1\nnot an entry\n");
//! assert_eq!(store.parse_outcome(), ParseOutcome::SyntaxError { line: 3 });
//! assert_eq!(store.check().err(), Some(LoadError::Syntax { line: 3 }));
//!
//! // Entries before the bad line are still available
//! assert_eq!(store.get_integer("a", "x", 0), 1);
//! ```
//!
//! ## Custom Scanners
//!
//! The store only depends on the [`Scanner`] and [`EventHandler`] traits.
//! [`StoreBuilder`] is the handler; feed it from any source:
//!
//! ```rust
//! use ini_reader::{EventHandler, ParseOutcome, StoreBuilder};
//!
//! let mut builder = StoreBuilder::new();
//! builder.ingest("Paths", "include", "/usr/include");
//! builder.ingest("paths", "Include", "/usr/local/include");
//! let store = builder.finish(ParseOutcome::Success);
//!
//! assert_eq!(
//!     store.get("PATHS", "include", ""),
//!     "/usr/include\n/usr/local/include"
//! );
//! assert_eq!(store.fields("paths"), vec!["include", "Include"]);
//! ```

pub mod coerce;
pub mod error;
pub mod scanner;
pub mod store;


// Re-export main types
pub use error::{LoadError, ParseOutcome};
pub use scanner::{EventHandler, IniScanner, Scanner, ScannerOptions};
pub use store::{ConfigStore, DuplicateKeyPolicy, StoreBuilder, StoreConfig};
