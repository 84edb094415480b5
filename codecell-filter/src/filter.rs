//! Filter pipeline
//!
//! pandoc runs a JSON filter by piping the document through it: the whole AST arrives as
//! JSON on stdin and the (possibly modified) AST is expected back on stdout. This module
//! owns that round: parse, check the API version, walk the tree, write it back.
//!
//! A [`Filter`] is a set of callbacks keyed by node type. The walk visits every node of
//! that type wherever it sits (inside block quotes, lists, divs, footnotes and other
//! tables), children before parents, and splices in whatever the callback returns. The
//! walk is a `pandoc_ast::MutVisitor`; tables get their own descent so that cells are
//! always visited before the table itself is handed to the callback.

use crate::error::FilterError;
use crate::normalize::{NormalizeOptions, TableNormalizer};
use crate::stringify::{PlainStringify, Stringify};
use log::info;
use pandoc_ast::{Block, MutVisitor, Pandoc};
use serde_json::Value;

/// Oldest pandoc-types release with the `TableHead`/`TableBody`/`TableFoot` table encoding
/// (pandoc 2.10).
pub const MIN_API_VERSION: [u32; 2] = [1, 21];

/// Callbacks applied during a document walk.
///
/// Every callback defaults to returning its input unchanged.
pub trait Filter: Send + Sync {
    /// Name used in log output.
    fn name(&self) -> &str;

    /// Called with each `Block::Table`, after the tables nested inside it.
    fn table(&self, table: Block) -> Block {
        table
    }
}

/// Counts gathered during one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub tables_seen: usize,
    pub tables_replaced: usize,
}

/// Rewrites single-cell code tables into raw markdown tables.
pub struct CodeTableFilter<S = PlainStringify> {
    normalizer: TableNormalizer<S>,
}

impl CodeTableFilter<PlainStringify> {
    pub fn new(options: NormalizeOptions) -> Self {
        CodeTableFilter {
            normalizer: TableNormalizer::with_options(options),
        }
    }
}

impl Default for CodeTableFilter<PlainStringify> {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

impl<S: Stringify> CodeTableFilter<S> {
    pub fn with_normalizer(normalizer: TableNormalizer<S>) -> Self {
        CodeTableFilter { normalizer }
    }

    pub fn options(&self) -> &NormalizeOptions {
        self.normalizer.options()
    }
}

impl<S> Filter for CodeTableFilter<S>
where
    S: Stringify + Send + Sync,
{
    fn name(&self) -> &str {
        "code-table"
    }

    fn table(&self, table: Block) -> Block {
        self.normalizer.normalize(table)
    }
}

/// Run `filter` over a pandoc JSON document and return the filtered JSON.
///
/// The API version is read before the tree is decoded, so a document from an older pandoc
/// is reported as such instead of failing on its table encoding.
pub fn run_json<F: Filter + ?Sized>(input: &str, filter: &F) -> Result<String, FilterError> {
    let value: Value = serde_json::from_str(input).map_err(FilterError::Parse)?;
    check_api_version(&api_version(&value))?;

    let mut doc: Pandoc = serde_json::from_value(value).map_err(FilterError::Parse)?;
    let report = walk_document(&mut doc, filter);
    info!(
        "{}: {} of {} tables rewritten",
        filter.name(),
        report.tables_replaced,
        report.tables_seen
    );

    serde_json::to_string(&doc).map_err(FilterError::Serialize)
}

/// The `pandoc-api-version` array of a raw document, or empty when absent or malformed.
fn api_version(document: &Value) -> Vec<u32> {
    document
        .get("pandoc-api-version")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .map_while(|part| part.as_u64().and_then(|n| u32::try_from(n).ok()))
                .collect()
        })
        .unwrap_or_default()
}

/// Reject documents from a pandoc whose table encoding differs from the model.
pub fn check_api_version(found: &[u32]) -> Result<(), FilterError> {
    let [major, minor] = MIN_API_VERSION;
    match found {
        [found_major, found_minor, ..] if *found_major == major && *found_minor >= minor => {
            Ok(())
        }
        _ => Err(FilterError::UnsupportedApiVersion {
            found: found.to_vec(),
        }),
    }
}

/// Apply `filter` to every node of the document, in place.
pub fn walk_document<F: Filter + ?Sized>(doc: &mut Pandoc, filter: &F) -> FilterReport {
    let mut walk = TableWalk {
        filter,
        report: FilterReport::default(),
    };
    walk.visit_vec_block(&mut doc.blocks);
    walk.report
}

struct TableWalk<'f, F: ?Sized> {
    filter: &'f F,
    report: FilterReport,
}

impl<F: Filter + ?Sized> MutVisitor for TableWalk<'_, F> {
    fn visit_block(&mut self, block: &mut Block) {
        let Block::Table(_, (short, caption), _, (_, head), bodies, (_, foot)) = block else {
            self.walk_block(block);
            return;
        };

        if let Some(short) = short {
            for inline in short.iter_mut() {
                self.visit_inline(inline);
            }
        }
        self.visit_vec_block(caption);
        let rows = head
            .iter_mut()
            .chain(
                bodies
                    .iter_mut()
                    .flat_map(|(_, _, head, body)| head.iter_mut().chain(body.iter_mut())),
            )
            .chain(foot.iter_mut());
        for (_, cells) in rows {
            for (_, _, _, _, content) in cells.iter_mut() {
                self.visit_vec_block(content);
            }
        }

        let table = std::mem::replace(block, Block::Null);
        self.report.tables_seen += 1;
        let replacement = self.filter.table(table);
        if !matches!(replacement, Block::Table(..)) {
            self.report.tables_replaced += 1;
        }
        *block = replacement;
    }
}
