//! Table builders shared by unit tests.

use pandoc_ast::{Alignment, Attr, Block, Cell, Inline, Row};

pub fn attr() -> Attr {
    (String::new(), vec![], vec![])
}

pub fn cell(content: Vec<Block>) -> Cell {
    (attr(), Alignment::AlignDefault, 1, 1, content)
}

pub fn text_cell(text: &str) -> Cell {
    cell(vec![Block::Plain(vec![Inline::Str(text.to_string())])])
}

pub fn row(cells: Vec<Cell>) -> Row {
    (attr(), cells)
}

/// Table with the given head rows and one body holding `body_rows`.
pub fn table(head_rows: Vec<Row>, body_rows: Vec<Row>) -> Block {
    Block::Table(
        attr(),
        (None, vec![]),
        vec![],
        (attr(), head_rows),
        vec![(attr(), 0, vec![], body_rows)],
        (attr(), vec![]),
    )
}

pub fn code_table(text: &str) -> Block {
    table(vec![row(vec![text_cell(text)])], vec![])
}

pub fn raw(format: &str, text: &str) -> Block {
    Block::RawBlock(pandoc_ast::Format(format.to_string()), text.to_string())
}

/// Document at pandoc-types 1.23.1 with empty meta.
pub fn document(blocks: Vec<Block>) -> pandoc_ast::Pandoc {
    let mut doc: pandoc_ast::Pandoc = serde_json::from_value(serde_json::json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {},
        "blocks": []
    }))
    .expect("empty document to parse");
    doc.blocks = blocks;
    doc
}
