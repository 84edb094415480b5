//! End-to-end runs of the code table filter over pandoc JSON documents.

use codecell_filter::pandoc_ast::{Block, Format, Pandoc};
use codecell_filter::error::FilterError;
use codecell_filter::filter::{run_json, walk_document, CodeTableFilter};
use codecell_filter::normalize::{NormalizeOptions, TableNormalizer};
use insta::assert_snapshot;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("pandoc")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

fn filtered(name: &str) -> Pandoc {
    let output = run_json(&fixture(name), &CodeTableFilter::default()).expect("filter to run");
    serde_json::from_str(&output).expect("filter output to be a pandoc document")
}

fn raw_text(block: &Block) -> &str {
    match block {
        Block::RawBlock(format, text) => {
            assert_eq!(format, &Format("markdown".to_string()));
            text
        }
        other => panic!("expected RawBlock, got {other:?}"),
    }
}

#[test]
fn code_table_becomes_raw_markdown() {
    let doc = filtered("docx-code-table.json");

    assert_snapshot!(raw_text(&doc.blocks[2]), @r"
    | Code |
    |------|
    | npm install <br> npm run dev |
    ");
}

#[test]
fn regular_table_is_left_alone() {
    let doc = filtered("docx-code-table.json");
    let original: Pandoc = serde_json::from_str(&fixture("docx-code-table.json")).unwrap();

    assert_eq!(doc.blocks[3], original.blocks[3]);
    assert!(matches!(doc.blocks[3], Block::Table(..)));
}

#[test]
fn code_table_inside_block_quote_is_rewritten() {
    let doc = filtered("docx-code-table.json");

    let Block::BlockQuote(quoted) = &doc.blocks[4] else {
        panic!("expected BlockQuote, got {:?}", doc.blocks[4]);
    };
    assert_eq!(
        raw_text(&quoted[0]),
        "| Code |\n|------|\n| echo $PATH |"
    );
}

#[test]
fn everything_but_code_tables_survives_unchanged() {
    let input = fixture("docx-code-table.json");
    let output = run_json(&input, &CodeTableFilter::default()).unwrap();

    let before: Value = serde_json::from_str(&input).unwrap();
    let after: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(after["pandoc-api-version"], before["pandoc-api-version"]);
    assert_eq!(after["meta"], before["meta"]);
    assert_eq!(after["blocks"][0], before["blocks"][0]);
    assert_eq!(after["blocks"][1], before["blocks"][1]);
    assert_eq!(after["blocks"][3], before["blocks"][3]);
}

#[test]
fn raw_block_is_encoded_for_pandoc() {
    let output = run_json(&fixture("docx-code-table.json"), &CodeTableFilter::default()).unwrap();
    let after: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(after["blocks"][2]["t"], "RawBlock");
    assert_eq!(after["blocks"][2]["c"][0], "markdown");
}

#[test]
fn report_counts_seen_and_rewritten_tables() {
    let mut doc: Pandoc = serde_json::from_str(&fixture("docx-code-table.json")).unwrap();
    let report = walk_document(&mut doc, &CodeTableFilter::default());

    assert_eq!(report.tables_seen, 3);
    assert_eq!(report.tables_replaced, 2);
}

#[test]
fn options_reach_the_emitted_block() {
    let filter = CodeTableFilter::new(NormalizeOptions {
        header_label: "Shell".to_string(),
        line_break: "<br>".to_string(),
        raw_format: "gfm".to_string(),
    });
    let output = run_json(&fixture("docx-code-table.json"), &filter).unwrap();
    let doc: Pandoc = serde_json::from_str(&output).unwrap();

    assert_eq!(
        doc.blocks[2],
        Block::RawBlock(
            Format("gfm".to_string()),
            "| Shell |\n|-------|\n| npm install<br>npm run dev |".to_string()
        )
    );
}

#[test]
fn old_api_version_is_rejected() {
    let input = r#"{"pandoc-api-version":[1,20],"meta":{},"blocks":[]}"#;
    let err = run_json(input, &CodeTableFilter::default()).unwrap_err();

    assert!(matches!(
        err,
        FilterError::UnsupportedApiVersion { ref found } if found == &vec![1, 20]
    ));
}

#[test]
fn unknown_block_type_is_a_parse_error() {
    let input = r#"{"pandoc-api-version":[1,23],"meta":{},"blocks":[{"t":"Widget","c":[]}]}"#;
    let err = run_json(input, &CodeTableFilter::default()).unwrap_err();

    assert!(matches!(err, FilterError::Parse(_)));
}

#[test]
fn empty_document_round_trips() {
    let input = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[]}"#;
    let output = run_json(input, &CodeTableFilter::default()).unwrap();

    let before: Value = serde_json::from_str(input).unwrap();
    let after: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(after, before);
}

#[test]
fn table_from_oldest_supported_pandoc_is_rewritten() {
    let input = r#"{"pandoc-api-version":[1,21],"meta":{},"blocks":[
        {"t":"Table","c":[["",[],[]],[null,[]],[[{"t":"AlignDefault"},{"t":"ColWidthDefault"}]],
            [["",[],[]],[[["",[],[]],[[["",[],[]],{"t":"AlignDefault"},1,1,
                [{"t":"Plain","c":[{"t":"Str","c":"ls"}]}]]]]]],
            [],[["",[],[]],[]]]}
    ]}"#;
    let output = run_json(input, &CodeTableFilter::default()).unwrap();
    let after: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(after["pandoc-api-version"], serde_json::json!([1, 21]));
    assert_eq!(after["blocks"][0]["t"], "RawBlock");
    assert_eq!(after["blocks"][0]["c"][1], "| Code |\n|------|\n| ls |");
}

#[test]
fn stringify_can_be_swapped_out() {
    let shout = |blocks: &[Block]| format!("{} blocks", blocks.len());
    let filter = CodeTableFilter::with_normalizer(TableNormalizer::new(
        NormalizeOptions::default(),
        shout,
    ));
    let output = run_json(&fixture("docx-code-table.json"), &filter).unwrap();
    let doc: Pandoc = serde_json::from_str(&output).unwrap();

    assert_eq!(raw_text(&doc.blocks[2]), "| Code |\n|------|\n| 1 blocks |");
    assert_eq!(filter.options(), &NormalizeOptions::default());
}
