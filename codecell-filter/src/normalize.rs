//! Single-cell code table normalization
//!
//! When pandoc reads a word-processor document, some code blocks come out as a table whose
//! head holds one row with one cell. Rendered as-is they turn into a grid table or an HTML
//! table. The normalizer recognizes that shape and replaces the table with a raw markdown
//! block:
//!
//!     | Code |
//!     |------|
//!     | line one <br> line two |
//!
//! A pipe table cell cannot hold a raw newline, so line breaks inside the cell text are
//! written as an inline `<br>` tag. Every other table is returned untouched.
//!
//! The shape test is a heuristic. Any table whose head is exactly one row of one cell is
//! treated as code, with no look at the label text or styling. A table written without a
//! head section has a head with no rows, so it fails on the row count.

use crate::stringify::{PlainStringify, Stringify};
use log::{debug, trace};
use pandoc_ast::{Block, Cell, Format, TableHead};
use std::fmt;

/// Knobs for the emitted block. The defaults produce the canonical output shown above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Header text of the emitted table.
    pub header_label: String,
    /// Replacement for each line break inside the cell text.
    pub line_break: String,
    /// Format tag of the emitted raw block.
    pub raw_format: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            header_label: "Code".to_string(),
            line_break: " <br> ".to_string(),
            raw_format: "markdown".to_string(),
        }
    }
}

/// Result of inspecting a table's head.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    /// Exactly one head row with exactly one cell.
    CodeCell(&'a Cell),
    /// Anything else, with the first check that failed.
    Other(Mismatch),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    HeadRows(usize),
    HeadCells(usize),
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::HeadRows(n) => write!(f, "head has {n} rows, expected 1"),
            Mismatch::HeadCells(n) => write!(f, "head row has {n} cells, expected 1"),
        }
    }
}

/// Check a table head: one row, then one cell in that row.
pub fn classify(head: &TableHead) -> Shape<'_> {
    let (_, rows) = head;
    let [(_, cells)] = rows.as_slice() else {
        return Shape::Other(Mismatch::HeadRows(rows.len()));
    };
    match cells.as_slice() {
        [cell] => Shape::CodeCell(cell),
        cells => Shape::Other(Mismatch::HeadCells(cells.len())),
    }
}

/// Replace every `\n` in `text` with `replacement`. Other characters, `\r` included,
/// are kept as they are.
pub fn encode_line_breaks(text: &str, replacement: &str) -> String {
    text.replace('\n', replacement)
}

pub struct TableNormalizer<S = PlainStringify> {
    options: NormalizeOptions,
    stringify: S,
}

impl TableNormalizer<PlainStringify> {
    pub fn with_options(options: NormalizeOptions) -> Self {
        Self::new(options, PlainStringify)
    }
}

impl Default for TableNormalizer<PlainStringify> {
    fn default() -> Self {
        Self::with_options(NormalizeOptions::default())
    }
}

impl<S: Stringify> TableNormalizer<S> {
    pub fn new(options: NormalizeOptions, stringify: S) -> Self {
        TableNormalizer { options, stringify }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Rewrite a single-cell code table into a raw markdown block. Any other block,
    /// tables of a different shape included, is handed back unchanged.
    pub fn normalize(&self, block: Block) -> Block {
        let text = match &block {
            Block::Table(_, _, _, head, _, _) => match classify(head) {
                Shape::CodeCell((_, _, _, _, content)) => self.stringify.stringify(content),
                Shape::Other(reason) => {
                    trace!("keeping table: {reason}");
                    return block;
                }
            },
            _ => return block,
        };

        let rendered = self.render(&text);
        debug!(
            "rewrote single-cell table as {} block ({} bytes)",
            self.options.raw_format,
            rendered.len()
        );
        Block::RawBlock(Format(self.options.raw_format.clone()), rendered)
    }

    /// Build the three-line pipe table for already flattened cell text.
    pub fn render(&self, text: &str) -> String {
        let label = &self.options.header_label;
        let rule = "-".repeat(label.chars().count() + 2);
        let body = encode_line_breaks(text, &self.options.line_break);
        [
            format!("| {label} |"),
            format!("|{rule}|"),
            format!("| {body} |"),
        ]
        .join("\n")
    }
}
