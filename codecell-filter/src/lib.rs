//! pandoc filter for code blocks that arrive as tables
//!
//!     Converting a word-processor document with pandoc turns some code blocks into a table
//!     whose head is a single row holding a single cell. Written out as markdown, that becomes
//!     a grid or HTML table instead of something readable. This crate rewrites those tables
//!     into a small pipe table with the code in one cell, and leaves every other table alone.
//!
//!     TLDR:
//!         - The crate never parses or renders a document format itself. pandoc does both, the
//!           filter only rewrites the JSON AST in between.
//!         - Table nodes are the only thing the filter changes.
//!         - Flattening cell content to text is pluggable (see stringify.rs).
//!
//! Architecture
//!
//!     The document tree is the `pandoc_ast` crate's model, re-exported here so callers
//!     build and match nodes with the same types the filter uses.
//!
//!     This is a pure lib: it powers codecell-cli but makes no assumption about a shell, no
//!     reading of stdin, env vars or printing happens here.
//!
//!     .
//!     ├── error.rs        # FilterError
//!     ├── stringify.rs    # Stringify trait and the plain-text policy
//!     ├── normalize.rs    # classify a table, build the replacement block
//!     ├── filter.rs       # Filter callbacks, tree walk, JSON round
//!     └── lib.rs
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs
//!     └── pandoc
//!         ├── <testname>.rs
//!         └── fixtures
//!             └── <docname>.json  # documents as emitted by `pandoc -t json`
//!
//!     Note that rust does not by default discover tests in subdirectories, so these are
//!     included from tests/lib.rs.
//!
//! Usage with pandoc
//!
//!     pandoc input.docx -t gfm --wrap=none --filter codecell -o output.md
//!
//!     `--wrap=none` keeps pandoc from reflowing the surrounding text; the raw blocks emitted
//!     here are written through verbatim either way.

pub mod error;
pub mod filter;
pub mod normalize;
pub mod stringify;

#[cfg(test)]
mod testing;

pub use pandoc_ast;

pub use error::FilterError;
pub use filter::{run_json, walk_document, CodeTableFilter, Filter, FilterReport};
pub use normalize::{NormalizeOptions, TableNormalizer};
pub use stringify::{PlainStringify, Stringify};
